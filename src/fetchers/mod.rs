pub mod profile_scraper;

pub use profile_scraper::{parse_profile, ProfileScraper};
