use crate::error::ScrapeError;
use crate::results::Record;
use crate::utils::absolute_link;
use scraper::{ElementRef, Html, Selector};

/// Repeated listing item, one per product
const PRODUCT_SELECTOR: &str = "article.product_pod";
/// Anchor carrying the title and the product href
const TITLE_LINK_SELECTOR: &str = "h3 a";
/// Element whose text is the price
const PRICE_SELECTOR: &str = "p.price_color";

/// Compiled selectors for a catalogue listing page
pub struct ListingSelectors {
    product: Selector,
    title_link: Selector,
    price: Selector,
}

impl ListingSelectors {
    /// Compile the product, title-link and price selectors
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            product: selector(PRODUCT_SELECTOR)?,
            title_link: selector(TITLE_LINK_SELECTOR)?,
            price: selector(PRICE_SELECTOR)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

/// Extracts every product on a listing page, compiling the selectors for this call
pub fn extract_records(html: &str, base_url: &str) -> Result<Vec<Record>, ScrapeError> {
    extract_records_with(&ListingSelectors::new()?, html, base_url)
}

/// Extracts every product on a listing page, in document order.
///
/// A page with no product containers yields an empty vector. A container
/// missing its title anchor, `title`, `href` or price fails the whole page.
pub fn extract_records_with(
    selectors: &ListingSelectors,
    html: &str,
    base_url: &str,
) -> Result<Vec<Record>, ScrapeError> {
    let doc = Html::parse_document(html);

    let records = doc
        .select(&selectors.product)
        .enumerate()
        .map(|(index, product)| extract_record(index, product, selectors, base_url))
        .collect::<Result<Vec<_>, _>>()?;

    ::log::debug!("HTML parser found {} products", records.len());
    Ok(records)
}

fn extract_record(
    index: usize,
    product: ElementRef<'_>,
    selectors: &ListingSelectors,
    base_url: &str,
) -> Result<Record, ScrapeError> {
    let anchor = product
        .select(&selectors.title_link)
        .next()
        .ok_or(ScrapeError::MissingElement {
            index,
            what: "title link",
        })?;

    let name = anchor
        .value()
        .attr("title")
        .ok_or(ScrapeError::MissingElement {
            index,
            what: "title attribute",
        })?
        .trim()
        .to_string();

    let href = anchor.value().attr("href").ok_or(ScrapeError::MissingElement {
        index,
        what: "href attribute",
    })?;

    let price = product
        .select(&selectors.price)
        .next()
        .ok_or(ScrapeError::MissingElement {
            index,
            what: "price",
        })?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let link = absolute_link(base_url, href).map_err(|source| ScrapeError::InvalidUrl {
        url: href.to_string(),
        source,
    })?;

    Ok(Record::new(name, price, link))
}
