//! Request URL composition for the OneCall endpoint.

use reqwest::Url;

use crate::{config::ApiConfig, error::FetchError, model::Coordinates};

const ONECALL_PATH: &str = "onecall";
const KEY_PARAM: &str = "appid";

/// Builds `{scheme}://{host}{base_path}/onecall?lat=..&lon=..&exclude=..&units=..&appid=..`.
///
/// Degrees use `f64`'s shortest round-trip formatting, so parsing the
/// query value back yields the same number.
pub fn onecall_url(api: &ApiConfig, coords: Coordinates) -> Result<Url, FetchError> {
    let origin = format!("{}://{}", api.scheme, api.host);
    let mut url = Url::parse(&origin).map_err(|e| FetchError::InvalidUrl {
        url: origin.clone(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::InvalidUrl {
            url: origin,
            reason: "missing host".to_string(),
        });
    }

    let base = api.base_path.trim_matches('/');
    if base.is_empty() {
        url.set_path(ONECALL_PATH);
    } else {
        url.set_path(&format!("{base}/{ONECALL_PATH}"));
    }

    url.query_pairs_mut()
        .append_pair("lat", &coords.latitude.to_string())
        .append_pair("lon", &coords.longitude.to_string())
        .append_pair("exclude", &api.exclude.join(","))
        .append_pair("units", api.units.as_str())
        .append_pair(KEY_PARAM, &api.api_key);

    Ok(url)
}

/// Copy of `url` safe to log: the API key value is masked.
pub fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == KEY_PARAM { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
