use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;

use super::{FeedDocument, FeedEntry};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write RSS channel: {0}")]
    Rss(#[from] rss::Error),
}

/// Serializes a [`FeedDocument`] to bytes.
pub trait Render {
    fn render(&self, feed: &FeedDocument) -> Result<Vec<u8>, RenderError>;
}

/// RSS 2.0 output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RssRenderer;

impl Render for RssRenderer {
    fn render(&self, feed: &FeedDocument) -> Result<Vec<u8>, RenderError> {
        let items: Vec<Item> = feed.entries.iter().map(entry_to_item).collect();

        let channel = ChannelBuilder::default()
            .title(feed.title.clone())
            .link(feed.link.clone())
            .description(feed.description.clone())
            .language(Some(feed.language.clone()))
            .generator(Some(concat!("scholarfeed ", env!("CARGO_PKG_VERSION")).to_string()))
            .items(items)
            .build();

        Ok(channel.write_to(Vec::new())?)
    }
}

fn entry_to_item(entry: &FeedEntry) -> Item {
    let link = (!entry.link.is_empty()).then(|| entry.link.clone());
    // Paper URLs are not guaranteed unique, so the guid is not marked as a permalink.
    let guid = (!entry.id.is_empty()).then(|| {
        GuidBuilder::default()
            .permalink(false)
            .value(entry.id.clone())
            .build()
    });

    ItemBuilder::default()
        .title(Some(entry.title.clone()))
        .link(link)
        .guid(guid)
        .description(Some(entry.summary.clone()))
        .pub_date(entry.published.map(|dt| dt.to_rfc2822()))
        .build()
}
