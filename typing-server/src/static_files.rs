use std::path::PathBuf;

use warp::filters::BoxedFilter;
use warp::path::FullPath;
use warp::reply::{Reply, Response};
use warp::{Filter, Rejection};

/// Serves the built single-page app.
///
/// Existing files under `static_dir` are returned as-is; any other GET that is
/// not under `/api` gets `index.html` so client-side routing can take over.
pub fn routes(static_dir: &str) -> BoxedFilter<(Response,)> {
    let index = PathBuf::from(static_dir).join("index.html");

    let outside_api = warp::path::full()
        .and_then(|path: FullPath| async move {
            if is_api_path(path.as_str()) {
                Err(warp::reject::not_found())
            } else {
                Ok::<(), Rejection>(())
            }
        })
        .untuple_one();

    // API paths must miss here as not-found, never as a wrong method
    outside_api
        .and(warp::get())
        .and(warp::fs::dir(static_dir.to_string()).or(warp::fs::file(index)).unify())
        .map(|file: warp::fs::File| file.into_response())
        .boxed()
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_paths_are_excluded() {
        assert!(is_api_path("/api"));
        assert!(is_api_path("/api/unknown"));
        assert!(!is_api_path("/apiary"));
        assert!(!is_api_path("/leaderboard"));
    }
}
