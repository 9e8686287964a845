//! CMS document model.
//!
//! This module defines [`Post`], the immutable input to one analysis run,
//! along with the [`RichBody`] union covering the two body shapes CMS
//! instances return in practice: a single HTML string, or a structured
//! array of block elements. Both shapes funnel into one markup string via
//! [`RichBody::to_markup`], so the extractor has a single code path.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// One fetched CMS content item.
///
/// Owned by the analyzer for the lifetime of one request and never mutated.
/// Field aliases cover the camelCase spellings common in CMS payloads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Post {
    /// Post headline, also the input to the headline scorer.
    pub title: String,

    /// Raw rich body in either supported shape.
    #[serde(default, alias = "content")]
    pub body: RichBody,

    /// SEO title tag, scored by length.
    #[serde(default, alias = "seoTitle")]
    pub seo_title: Option<String>,

    /// Meta description, scored by length.
    #[serde(default, alias = "seoDescription", alias = "metaDescription")]
    pub seo_description: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default, alias = "publishedAt", alias = "published_date")]
    pub published_at: Option<String>,

    #[serde(default, alias = "featuredImage")]
    pub featured_image: Option<String>,

    #[serde(default)]
    pub tags: Vec<Taxonomy>,

    #[serde(default)]
    pub categories: Vec<Taxonomy>,
}

/// A tag or category attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Taxonomy {
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// The two body shapes observed from CMS payloads.
///
/// Older documents carry a single HTML string; newer ones carry an array
/// of typed blocks. The variants are distinguished structurally rather
/// than by a discriminator field.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RichBody {
    Html(String),
    Blocks(Vec<BodyBlock>),
}

impl Default for RichBody {
    fn default() -> Self {
        RichBody::Html(String::new())
    }
}

impl RichBody {
    /// Renders the body as a single markup string.
    ///
    /// The HTML variant is returned as-is; the block variant is serialized
    /// into the equivalent tags so that tag counting and text extraction
    /// treat both shapes identically.
    pub fn to_markup(&self) -> Cow<'_, str> {
        match self {
            RichBody::Html(html) => Cow::Borrowed(html.as_str()),
            RichBody::Blocks(blocks) => {
                let mut out = String::new();
                for block in blocks {
                    block.write_markup(&mut out);
                }
                Cow::Owned(out)
            }
        }
    }

    /// True when the body carries no content at all.
    pub fn is_empty(&self) -> bool {
        match self {
            RichBody::Html(html) => html.trim().is_empty(),
            RichBody::Blocks(blocks) => blocks.is_empty(),
        }
    }
}

fn default_heading_level() -> u8 {
    2
}

/// One element of a block-array body.
///
/// Unknown block types deserialize to [`BodyBlock::Unsupported`] and render
/// to nothing rather than failing the whole document.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BodyBlock {
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    Paragraph {
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    Image {
        #[serde(default)]
        image: ImageNode,
    },
    #[serde(other)]
    Unsupported,
}

impl BodyBlock {
    fn write_markup(&self, out: &mut String) {
        match self {
            BodyBlock::Heading { level, children } => {
                let level = (*level).clamp(1, 6);
                out.push_str(&format!("<h{level}>"));
                for child in children {
                    child.write_text(out);
                }
                out.push_str(&format!("</h{level}>\n"));
            }
            BodyBlock::Paragraph { children } => {
                out.push_str("<p>");
                for child in children {
                    child.write_text(out);
                }
                out.push_str("</p>\n");
            }
            BodyBlock::Image { image } => {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">\n",
                    image.url,
                    image.alt.as_deref().unwrap_or("")
                ));
            }
            BodyBlock::Unsupported => {}
        }
    }
}

/// Inline rich-text node. Links and formatting marks nest their text in
/// `children`; leaf nodes carry it in `text`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InlineNode {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<InlineNode>,
}

impl InlineNode {
    fn write_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.write_text(out);
        }
    }
}

/// Image payload inside an image block.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImageNode {
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "alternativeText")]
    pub alt: Option<String>,
}
