use scraper::{ElementRef, Selector};
use std::thread;
use std::time::Duration;

/// Parse a CSS selector known at compile time
pub fn selector(css: &str) -> Selector {
    match Selector::parse(css) {
        Ok(sel) => sel,
        Err(e) => panic!("invalid built-in selector {css:?}: {e:?}"),
    }
}

/// Text of an element with whitespace collapsed
pub fn collapse_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapsed text of the first descendant matching `sel`, if non-empty
pub fn text_of(element: ElementRef<'_>, sel: &Selector) -> Option<String> {
    element
        .select(sel)
        .next()
        .map(collapse_text)
        .filter(|text| !text.is_empty())
}

/// Attribute value of the first descendant matching `sel`, if non-empty
pub fn attr_of(element: ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    element
        .select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Read a price from display text such as "449 000 $" or "$1,250,000"
pub fn parse_price(text: &str) -> Option<i64> {
    // Cents after a decimal separator are not part of the price
    let whole = text
        .split(|c: char| c == '.' || c == ',')
        .enumerate()
        .filter(|(idx, part)| *idx == 0 || part.trim_end_matches(|c: char| !c.is_ascii_digit()).len() != 2)
        .map(|(_, part)| part)
        .collect::<String>();

    let digits: String = whole.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Resolve a possibly relative href against the site origin
pub fn absolute_url(origin: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", origin.trim_end_matches('/'), href)
    }
}

/// Block for a fixed delay; zero returns immediately
pub fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn parses_prices_from_display_text() {
        assert_eq!(parse_price("449 000 $"), Some(449_000));
        assert_eq!(parse_price("$1,250,000"), Some(1_250_000));
        assert_eq!(parse_price("325 000,00 $"), Some(325_000));
        assert_eq!(parse_price("$599,900.00"), Some(599_900));
        assert_eq!(parse_price("Prix sur demande"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn resolves_relative_urls() {
        let origin = "https://duproprio.com";
        assert_eq!(absolute_url(origin, "/fr/maison/1"), "https://duproprio.com/fr/maison/1");
        assert_eq!(absolute_url(origin, "fr/maison/1"), "https://duproprio.com/fr/maison/1");
        assert_eq!(absolute_url(origin, "//cdn.example.com/a.jpg"), "https://cdn.example.com/a.jpg");
        assert_eq!(absolute_url(origin, "https://other.com/x"), "https://other.com/x");
    }

    #[test]
    fn collapses_whitespace_in_text() {
        let html = Html::parse_fragment("<div><p class=\"a\">  Rue   Principale\n  Ouest </p></div>");
        let root = html.root_element();
        assert_eq!(text_of(root, &selector("p.a")).as_deref(), Some("Rue Principale Ouest"));
        assert_eq!(text_of(root, &selector("p.missing")), None);
    }
}
