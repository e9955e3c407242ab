use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::ScraperSettings;
use crate::domain::{format_event_label, merge_best_time, parse_swim_time, BestTimes, RecordedTime, SwimmerProfile};
use crate::errors::IngestionError;
use crate::http::RateLimitedClient;

const UNKNOWN_TEAM: &str = "Unknown";

/// Fetches swimmer profile pages and turns them into [`SwimmerProfile`]s
pub struct ProfileScraper {
    client: RateLimitedClient,
    base_url: String,
    swimmer_id_regex: Regex,
}

impl ProfileScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            client: RateLimitedClient::new(settings)?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            swimmer_id_regex: Self::compile_regex()?,
        })
    }

    /// Scrape one profile. `reference` is a bare id or a profile URL.
    pub async fn fetch_profile(&mut self, reference: &str) -> Result<SwimmerProfile> {
        let id = self
            .extract_swimmer_id(reference)
            .ok_or_else(|| IngestionError::InvalidReference {
                reference: reference.to_string(),
            })?;

        let url = self.profile_url(&id);
        info!("  → Fetching {}", url);

        let profile = self
            .client
            .get_text(&url)
            .await
            .and_then(|html| parse_profile(&id, &html))
            .map_err(|e| IngestionError::Upstream {
                url: url.clone(),
                reason: format!("{:#}", e),
            })?;

        info!("  → {} ({}), {} events", profile.name, profile.team, profile.best_times.len());
        Ok(profile)
    }

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"^(?:.*/swimmer/)?(\d+)/?$").context("Failed to compile swimmer id regex")
    }

    fn extract_swimmer_id(&self, reference: &str) -> Option<String> {
        let captures = self.swimmer_id_regex.captures(reference.trim())?;
        Some(captures.get(1)?.as_str().to_string())
    }

    fn profile_url(&self, id: &str) -> String {
        format!("{}/swimmer/{}/", self.base_url, urlencoding::encode(id))
    }
}

/// Extract a profile from a swimmer page. Fails only when no name is found.
pub fn parse_profile(id: &str, html: &str) -> Result<SwimmerProfile> {
    let document = Html::parse_document(html);

    let name = extract_name(&document)?
        .with_context(|| format!("No swimmer name found on profile {}", id))?;
    let team = extract_team(&document)?.unwrap_or_else(|| UNKNOWN_TEAM.to_string());
    let best_times = extract_best_times(&document)?;
    let profile_image = extract_profile_image(&document)?;
    let (twitter, instagram) = extract_socials(&document)?;

    Ok(SwimmerProfile {
        id: id.to_string(),
        name,
        team,
        best_times,
        profile_image,
        twitter,
        instagram,
    })
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector '{}': {}", css, e))
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_name(document: &Html) -> Result<Option<String>> {
    let title = selector("h1.c-toolbar__title")?;
    let any_heading = selector("h1")?;

    let name = document
        .select(&title)
        .next()
        .or_else(|| document.select(&any_heading).next())
        .map(element_text)
        .filter(|name| !name.is_empty());

    Ok(name)
}

fn extract_team(document: &Html) -> Result<Option<String>> {
    let team_link = selector(".c-toolbar__meta a[href^=\"/team/\"]")?;

    Ok(document
        .select(&team_link)
        .next()
        .map(element_text)
        .filter(|team| !team.is_empty()))
}

fn extract_best_times(document: &Html) -> Result<BestTimes> {
    let rows = selector("tr")?;
    let event_cell = selector("td.u-text-truncate")?;
    let time_cell = selector("td.u-text-end.u-text-semi")?;

    let mut best_times = BestTimes::new();

    for row in document.select(&rows) {
        let (Some(event), Some(time)) = (row.select(&event_cell).next(), row.select(&time_cell).next())
        else {
            continue;
        };

        let raw_event = element_text(event);
        let raw_time = element_text(time);

        let Some(label) = format_event_label(&raw_event) else {
            debug!("Skipping event '{}'", raw_event);
            continue;
        };
        let Some(seconds) = parse_swim_time(&raw_time) else {
            warn!("Skipping unparsable time '{}' for {}", raw_time, label);
            continue;
        };

        if merge_best_time(&mut best_times, label.clone(), RecordedTime::new(raw_time, seconds)) {
            debug!("  {} = {:.2}s", label, seconds);
        }
    }

    Ok(best_times)
}

fn extract_profile_image(document: &Html) -> Result<Option<String>> {
    let image = selector(".c-toolbar__media-user img")?;

    Ok(document
        .select(&image)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string))
}

fn extract_socials(document: &Html) -> Result<(Option<String>, Option<String>)> {
    let links = selector("a[href]")?;
    let mut twitter = None;
    let mut instagram = None;

    for href in document.select(&links).filter_map(|a| a.value().attr("href")) {
        if twitter.is_none() && is_twitter_link(href) {
            twitter = Some(href.to_string());
        } else if instagram.is_none() && href.contains("instagram.com") {
            instagram = Some(href.to_string());
        }
    }

    Ok((twitter, instagram))
}

fn is_twitter_link(href: &str) -> bool {
    href.contains("twitter.com") || href.contains("//x.com") || href.contains("www.x.com")
}
