use tempfile::TempDir;

/// Create a scratch directory removed on drop
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Minimal RSS 2.0 document with one item per `(title, pub_date, description)`
pub fn rss_document(items: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\"><channel>\
         <title>Test feed</title><link>http://example.com/</link><description>test</description>\n",
    );
    for (title, pub_date, description) in items {
        xml.push_str(&format!(
            "<item><title>{}</title><pubDate>{}</pubDate><description>{}</description></item>\n",
            escape(title),
            pub_date,
            escape(description)
        ));
    }
    xml.push_str("</channel></rss>\n");
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
