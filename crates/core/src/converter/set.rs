//! One handler per category.

use std::fmt;
use std::sync::Arc;

use super::capabilities::Capabilities;
use super::config::ConverterConfig;
use super::handlers::{
    AudioHandler, ImageHandler, OfficeHandler, PdfTextHandler, SpreadsheetToTabularHandler,
    TabularInterchangeHandler, TabularToSpreadsheetHandler, TextToPdfHandler,
};
use super::traits::Handler;
use super::types::Category;

/// The complete set of handlers, one bound to every [`Category`].
///
/// Lookup is an exhaustive match, so a category without a handler cannot
/// exist.
#[derive(Clone)]
pub struct HandlerSet {
    image: Arc<dyn Handler>,
    audio: Arc<dyn Handler>,
    text_to_document: Arc<dyn Handler>,
    tabular_interchange: Arc<dyn Handler>,
    tabular_to_spreadsheet: Arc<dyn Handler>,
    spreadsheet_to_tabular: Arc<dyn Handler>,
    document_to_document: Arc<dyn Handler>,
    document_to_text: Arc<dyn Handler>,
}

impl HandlerSet {
    /// Builds the built-in handlers.
    ///
    /// Capabilities are injected here rather than read from globals so
    /// callers and tests decide what is available.
    pub fn new(config: &ConverterConfig, capabilities: Capabilities) -> Self {
        Self {
            image: Arc::new(ImageHandler::new()),
            audio: Arc::new(AudioHandler::new(
                config.clone(),
                capabilities.audio_transcoder,
            )),
            text_to_document: Arc::new(TextToPdfHandler::new()),
            tabular_interchange: Arc::new(TabularInterchangeHandler::new()),
            tabular_to_spreadsheet: Arc::new(TabularToSpreadsheetHandler::new()),
            spreadsheet_to_tabular: Arc::new(SpreadsheetToTabularHandler::new()),
            document_to_document: Arc::new(OfficeHandler::new(config.clone())),
            document_to_text: Arc::new(PdfTextHandler::new(capabilities.text_extraction)),
        }
    }

    /// Replaces the handler bound to `category`.
    pub fn with_handler(mut self, category: Category, handler: Arc<dyn Handler>) -> Self {
        *self.slot_mut(category) = handler;
        self
    }

    /// Returns the handler bound to `category`.
    pub fn handler_for(&self, category: Category) -> &Arc<dyn Handler> {
        match category {
            Category::Image => &self.image,
            Category::Audio => &self.audio,
            Category::TextToDocument => &self.text_to_document,
            Category::TabularInterchange => &self.tabular_interchange,
            Category::TabularToSpreadsheet => &self.tabular_to_spreadsheet,
            Category::SpreadsheetToTabular => &self.spreadsheet_to_tabular,
            Category::DocumentToDocument => &self.document_to_document,
            Category::DocumentToText => &self.document_to_text,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Arc<dyn Handler> {
        match category {
            Category::Image => &mut self.image,
            Category::Audio => &mut self.audio,
            Category::TextToDocument => &mut self.text_to_document,
            Category::TabularInterchange => &mut self.tabular_interchange,
            Category::TabularToSpreadsheet => &mut self.tabular_to_spreadsheet,
            Category::SpreadsheetToTabular => &mut self.spreadsheet_to_tabular,
            Category::DocumentToDocument => &mut self.document_to_document,
            Category::DocumentToText => &mut self.document_to_text,
        }
    }
}

impl fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for category in Category::ALL {
            list.entry(&self.handler_for(category).category());
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHandler;

    #[test]
    fn test_every_category_has_matching_handler() {
        let set = HandlerSet::new(&ConverterConfig::default(), Capabilities::none());
        for category in Category::ALL {
            assert_eq!(set.handler_for(category).category(), category);
        }
    }

    #[tokio::test]
    async fn test_with_handler_replaces_only_that_slot() {
        let mock = Arc::new(MockHandler::new(Category::Audio));
        let set = HandlerSet::new(&ConverterConfig::default(), Capabilities::none())
            .with_handler(Category::Audio, mock.clone());

        let dir = tempfile::TempDir::new().unwrap();
        let job = crate::converter::HandlerJob {
            source_path: dir.path().join("a.mp3"),
            output_path: dir.path().join("a_converted.wav"),
            source_ext: "mp3".to_string(),
            target_ext: "wav".to_string(),
        };
        set.handler_for(Category::Audio).handle(&job).await.unwrap();

        assert_eq!(mock.calls().await.len(), 1);
        assert_eq!(set.handler_for(Category::Image).category(), Category::Image);
    }
}
