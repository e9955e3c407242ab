use log::{debug, info};
use rand::Rng;

use super::types::{Pair, Rated};
use crate::config::PairingSettings;
use crate::errors::RankingError;

/// Source of uniform random indices for pair selection.
///
/// Every `rand::Rng` is a `PairRng`; tests can plug in a scripted source.
pub trait PairRng {
    /// Uniform index in `0..upper`; `upper` is never zero
    fn pick_index(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> PairRng for R {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Picks the next two swimmers to compare.
///
/// Looks for pairs whose rating gap fits a window that starts at
/// `initial_window` and widens by `window_step` up to `max_window`; the first
/// window with any candidates wins and one candidate is drawn uniformly. If
/// no window produces a pair, two distinct swimmers are drawn at random.
///
/// `entities` must already be filtered down to eligible swimmers.
pub fn select_pair<'a, T, R>(
    entities: &'a [T],
    settings: &PairingSettings,
    rng: &mut R,
) -> Result<Pair<'a, T>, RankingError>
where
    T: Rated,
    R: PairRng + ?Sized,
{
    if entities.len() < 2 {
        return Err(RankingError::NotEnoughEntities {
            eligible: entities.len(),
        });
    }

    let sorted = sort_by_rating_desc(entities);

    let mut window = settings.initial_window;
    while window <= settings.max_window {
        let candidates = pairs_within_window(&sorted, window);
        if !candidates.is_empty() {
            let (i, j) = candidates[rng.pick_index(candidates.len())];
            debug!(
                "Found pair {} / {} within window {} ({} candidates)",
                sorted[i].id(),
                sorted[j].id(),
                window,
                candidates.len()
            );
            return Ok(Pair {
                left: sorted[i],
                right: sorted[j],
            });
        }

        if settings.window_step <= 0.0 {
            break;
        }
        window += settings.window_step;
    }

    info!("No close rating matches found, selecting random pair");
    let (i, j) = distinct_random_indices(sorted.len(), rng);
    Ok(Pair {
        left: sorted[i],
        right: sorted[j],
    })
}

fn sort_by_rating_desc<T: Rated>(entities: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = entities.iter().collect();
    sorted.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    sorted
}

/// All index pairs (i < j) whose rating gap is at most `window`.
/// Relies on `sorted` being in descending rating order.
fn pairs_within_window<T: Rated>(sorted: &[&T], window: f64) -> Vec<(usize, usize)> {
    let mut candidates = Vec::new();

    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            let diff = sorted[i].rating() - sorted[j].rating();
            if diff.is_nan() || diff > window {
                break;
            }
            candidates.push((i, j));
        }
    }

    candidates
}

fn distinct_random_indices<R: PairRng + ?Sized>(len: usize, rng: &mut R) -> (usize, usize) {
    let first = rng.pick_index(len);
    let mut second = rng.pick_index(len - 1);
    if second >= first {
        second += 1;
    }
    (first, second)
}
