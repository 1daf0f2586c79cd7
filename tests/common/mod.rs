#![allow(dead_code)]

pub const USER_AGENT: &str = "book-scraper-tests/1.0";

/// One `article.product_pod` as books.toscrape.com renders it
pub fn product_pod(title: &str, price: &str, href: &str) -> String {
    format!(
        r#"<li class="col-xs-6 col-sm-4 col-md-3 col-lg-3">
    <article class="product_pod">
        <div class="image_container">
            <a href="{href}"><img src="../media/cache/2c/da/2cdad67c.jpg" alt="{title}" class="thumbnail"></a>
        </div>
        <p class="star-rating One"><i class="icon-star"></i></p>
        <h3><a href="{href}" title="{title}">{title}</a></h3>
        <div class="product_price">
            <p class="price_color">{price}</p>
            <p class="instock availability"><i class="icon-ok"></i> In stock</p>
        </div>
    </article>
</li>"#
    )
}

/// A listing page wrapping the given product pods
pub fn listing_page(pods: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en-us">
<head><title>All products | Books to Scrape - Sandbox</title></head>
<body>
<div class="page_inner"><section><ol class="row">
{}
</ol></section></div>
</body>
</html>"#,
        pods.join("\n")
    )
}

/// A listing page with `count` numbered books
pub fn numbered_page(page: u32, count: usize) -> String {
    let pods: Vec<String> = (0..count)
        .map(|i| {
            product_pod(
                &format!("Book {page}-{i}"),
                &format!("£{}.{:02}", 10 + i, page),
                &format!("book-{page}-{i}_{}/index.html", 1000 - i),
            )
        })
        .collect();
    listing_page(&pods)
}
