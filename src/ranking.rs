use std::cmp::Ordering;

use crate::entities::movie;

/// Sorts best-rated first and stamps `ranking` with the 1-based position.
/// Movies without a rating keep their relative order behind every rated one,
/// so they take the largest rank numbers.
pub fn assign(movies: &mut [movie::Model]) {
    movies.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for (i, movie) in movies.iter_mut().enumerate() {
        movie.ranking = Some(i as i32 + 1);
    }
}
