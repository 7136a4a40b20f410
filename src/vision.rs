//! Reading the JSON returned by the document text detection service.
//!
//! Only the fields the line reader consumes are modelled. Vertex coordinates
//! that are zero are omitted by the service, so every coordinate defaults to
//! `0`.

use geo::Coord;
use serde::Deserialize;
use tracing::instrument;

use crate::geometry::{Quad, Vertex};
use crate::{Block, LineError, Page, PageSize, Result, WordBox};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawVertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl From<RawVertex> for Vertex {
    fn from(RawVertex { x, y }: RawVertex) -> Self {
        Coord { x, y }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<RawVertex>,
}

impl BoundingPoly {
    fn to_vertices(&self) -> Vec<Vertex> {
        self.vertices.iter().copied().map(Vertex::from).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bounding_poly: BoundingPoly,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionBlock {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisionPage {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub blocks: Vec<VisionBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullTextAnnotation {
    #[serde(default)]
    pub pages: Vec<VisionPage>,
}

/// One image's annotate response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateResponse {
    #[serde(default)]
    pub text_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    pub full_text_annotation: FullTextAnnotation,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseFile {
    Batch { responses: Vec<AnnotateResponse> },
    Single(AnnotateResponse),
}

impl AnnotateResponse {
    /// Parses a single response, or the first entry of a batch response.
    pub fn from_json(json: &str) -> Result<Self> {
        let response = match serde_json::from_str::<ResponseFile>(json)? {
            ResponseFile::Batch { responses } => responses.into_iter().next().unwrap_or_default(),
            ResponseFile::Single(response) => response,
        };
        Ok(response)
    }

    pub fn pages(&self) -> &[VisionPage] {
        &self.full_text_annotation.pages
    }

    /// Word boxes of the whole response. The first annotation covers the
    /// full text of the image and is skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn word_boxes(&self) -> Result<Vec<WordBox>> {
        self.text_annotations
            .iter()
            .skip(1)
            .map(|annotation| {
                WordBox::from_vertices(
                    annotation.description.clone(),
                    &annotation.bounding_poly.to_vertices(),
                )
            })
            .collect()
    }

    /// Block regions of one page; an unknown page has none.
    pub fn blocks(&self, page_index: usize) -> Result<Vec<Block>> {
        let Some(page) = self.pages().get(page_index) else {
            return Ok(Vec::new());
        };
        page.blocks
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let what = format!("page {page_index} block {index}");
                Quad::from_vertices(&block.bounding_box.to_vertices(), &what).map(Block::new)
            })
            .collect()
    }

    /// Dimensions the service reports for a page, when present.
    pub fn page_size(&self, page_index: usize) -> Option<PageSize> {
        self.pages()
            .get(page_index)
            .filter(|page| page.width > 0 && page.height > 0)
            .map(|page| PageSize {
                width: page.width,
                height: page.height,
            })
    }

    /// The first page's blocks together with every word box.
    ///
    /// `size` overrides the reported page dimensions, which are required
    /// otherwise.
    pub fn to_page(&self, size: Option<PageSize>) -> Result<Page> {
        let size = size
            .or_else(|| self.page_size(0))
            .ok_or(LineError::UnknownPageSize)?;
        let page = Page::new(size, self.blocks(0)?, self.word_boxes()?);
        log::debug!(
            "Page {}x{} with {} blocks and {} words",
            size.width,
            size.height,
            page.blocks.len(),
            page.words.len()
        );
        Ok(page)
    }
}
