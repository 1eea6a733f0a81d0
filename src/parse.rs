use scraper::{ElementRef, Html, Node, Selector};

use crate::{Error, Result};

/// A parsed surname index page.
///
/// The archive lists records inside the page's first `<dl>`: names are
/// `<a>` links and each `<dd>` is a record block whose person entries are
/// separated by `<br>`.
pub struct IndexPage {
    doc: Html,
}

impl IndexPage {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// Text of every name link under the first `<dl>`, in document order.
    pub fn name_links(&self) -> Result<Vec<String>> {
        let link_selector = create_selector("a")?;
        let names = self
            .record_list()?
            .select(&link_selector)
            .map(|link| link.text().collect::<String>())
            .collect();
        Ok(names)
    }

    /// Person entries of every record block under the first `<dl>`.
    ///
    /// A `<dd>` block is split into entries at each `<br>`; text of inline
    /// elements such as the name link is flattened into the entry.
    pub fn record_entries(&self) -> Result<Vec<String>> {
        let block_selector = create_selector("dd")?;
        let mut entries = Vec::new();

        for block in self.record_list()?.select(&block_selector) {
            let mut current = String::new();
            for node in block.children() {
                if let Some(element) = ElementRef::wrap(node) {
                    if element.value().name() == "br" {
                        flush_entry(&mut current, &mut entries);
                    } else {
                        current.push_str(&element.text().collect::<String>());
                    }
                } else if let Node::Text(text) = node.value() {
                    current.push_str(text);
                }
            }
            flush_entry(&mut current, &mut entries);
        }
        Ok(entries)
    }

    fn record_list(&self) -> Result<ElementRef<'_>> {
        let list_selector = create_selector("dl")?;
        self.doc
            .select(&list_selector)
            .next()
            .ok_or(Error::MalformedPage("dl"))
    }
}

fn flush_entry(current: &mut String, entries: &mut Vec<String>) {
    if current.trim().is_empty() {
        current.clear();
    } else {
        entries.push(std::mem::take(current));
    }
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_PAGE: &str = r#"<html><body>
<dl>
<dt>SMITH</dt>
<dd><a href="smith1.htm">Mary Ann Smith</a> b. c 1830, Mere<br/>
<a href="smith2.htm">John Smith</a> b. 1850, Devizes<br/>
A household note with no birth marker</dd>
<dt>TANNER</dt>
<dd><a href="tanner1.htm">Sarah Tanner</a> b. c 1790<br/></dd>
</dl>
</body></html>"#;

    #[test]
    fn name_links_come_from_the_first_record_list() {
        let page = IndexPage::parse(INDEX_PAGE);
        assert_eq!(
            page.name_links().unwrap(),
            vec!["Mary Ann Smith", "John Smith", "Sarah Tanner"]
        );
    }

    #[test]
    fn record_blocks_split_into_entries_at_line_breaks() {
        let page = IndexPage::parse(INDEX_PAGE);
        let entries = page.record_entries().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].trim(), "Mary Ann Smith b. c 1830, Mere");
        assert_eq!(entries[1].trim(), "John Smith b. 1850, Devizes");
        assert_eq!(entries[2].trim(), "A household note with no birth marker");
        assert_eq!(entries[3].trim(), "Sarah Tanner b. c 1790");
    }

    #[test]
    fn a_page_without_a_record_list_is_malformed() {
        let page = IndexPage::parse("<html><body><p>maintenance</p></body></html>");
        assert!(matches!(page.name_links(), Err(Error::MalformedPage("dl"))));
        assert!(matches!(
            page.record_entries(),
            Err(Error::MalformedPage("dl"))
        ));
    }

    #[test]
    fn only_the_first_record_list_is_scraped() {
        let html = r#"<html><body>
<dl><dd><a href="a.htm">Mary</a></dd></dl>
<dl><dd><a href="b.htm">Imposter</a></dd></dl>
</body></html>"#;
        let page = IndexPage::parse(html);
        assert_eq!(page.name_links().unwrap(), vec!["Mary"]);
    }
}
