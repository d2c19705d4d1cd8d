//! Opening a tile's link.

/// Host side effect that opens a URL.
///
/// Any `FnMut(&str)` closure is a `LinkOpener`, which keeps tests and
/// simple hosts free of wrapper types.
pub trait LinkOpener {
    /// Open `link` (new tab, system browser, ...).
    fn open(&mut self, link: &str);
}

impl<F: FnMut(&str)> LinkOpener for F {
    fn open(&mut self, link: &str) {
        self(link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_open_links() {
        let mut opened = Vec::new();
        let mut opener = |link: &str| opened.push(link.to_owned());
        opener.open("https://example.com");
        assert_eq!(opened, vec!["https://example.com".to_owned()]);
    }
}
