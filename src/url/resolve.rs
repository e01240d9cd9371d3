use url::Url;

/// Resolves an image `src` attribute against the page it was found on
///
/// # Resolution Rules
///
/// 1. A value that parses as an absolute URL is used directly; only
///    `http` and `https` are accepted (`data:` and friends are skipped)
/// 2. A protocol-relative value (`//host/path`) takes the page's scheme
/// 3. Anything else keeps the page's authority and replaces its path with
///    the value; a `?query` suffix is kept and a `#fragment` dropped
///
/// Note that rule 3 substitutes the path rather than joining it, so
/// `img/a.png` found on `/blog/post` resolves to `/img/a.png`.
///
/// # Returns
///
/// * `Some(Url)` - The URL to fetch
/// * `None` - Empty or unusable value
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_fetch::url::resolve_asset_url;
///
/// let page = Url::parse("https://example.com/blog/post").unwrap();
/// let asset = resolve_asset_url(&page, "img/a.png").unwrap();
/// assert_eq!(asset.as_str(), "https://example.com/img/a.png");
/// ```
pub fn resolve_asset_url(page: &Url, src: &str) -> Option<Url> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    match Url::parse(src) {
        Ok(url) => is_http(&url).then_some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            if let Some(rest) = src.strip_prefix("//") {
                return Url::parse(&format!("{}://{}", page.scheme(), rest)).ok();
            }

            let without_fragment = src.split('#').next().unwrap_or_default();
            let (path, query) = match without_fragment.split_once('?') {
                Some((path, query)) => (path, Some(query)),
                None => (without_fragment, None),
            };

            let mut url = page.clone();
            url.set_path(path);
            url.set_query(query);
            url.set_fragment(None);
            Some(url)
        }
        Err(_) => None,
    }
}

fn is_http(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}
