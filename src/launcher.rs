use tracing::warn;

/// Fire-and-forget URL launch. No retry, no result handed back to callers.
pub trait LinkOpener {
    fn open(&self, url: &str);
}

/// Opens URLs with the platform default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Browser;

impl LinkOpener for Browser {
    fn open(&self, url: &str) {
        if let Err(err) = webbrowser::open(url) {
            warn!(%url, "failed to open link: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingOpener {
        urls: RefCell<Vec<String>>,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) {
            self.urls.borrow_mut().push(url.to_string());
        }
    }

    #[test]
    fn opener_is_object_safe() {
        let opener = RecordingOpener {
            urls: RefCell::new(Vec::new()),
        };
        let dyn_opener: &dyn LinkOpener = &opener;
        dyn_opener.open("https://example.com/");
        assert_eq!(opener.urls.borrow().as_slice(), ["https://example.com/"]);
    }
}
