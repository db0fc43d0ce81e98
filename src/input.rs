//! JSON description of a flex container, as read by the `flex-layout` tool
//!
//! ```json
//! {
//!   "available": { "width": 800, "height": 600 },
//!   "style": "display: flex; width: 300px; flex-pack: justify",
//!   "items": [
//!     { "style": "flex: 1", "content": { "width": 50, "height": 20 }, "baseline": 15 }
//!   ]
//! }
//! ```
//!
//! Styles are css declaration lists, parsed the same way as a `style` attribute.
use anyhow::{Context, Result};
use serde::Deserialize;
use weft_css3::Css3;
use weft_flexbox::{ContainerStyle, FixedSizeBox, FlexItemStyle};
use weft_shared::types::Size;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlexInput {
    /// Size of the containing block
    pub available: Size<f32>,
    /// Declarations of the container
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub items: Vec<ItemInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemInput {
    #[serde(default)]
    pub style: String,
    /// Content box size of the item when nothing overrides it
    #[serde(default)]
    pub content: Size<f32>,
    /// Narrowest content width, defaults to the content width
    pub min_content_width: Option<f32>,
    /// Baseline of the first line, measured from the top of the content box
    pub baseline: Option<f32>,
}

impl FlexInput {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("invalid flex layout description")
    }

    pub fn container_style(&self) -> Result<ContainerStyle> {
        let block =
            Css3::parse_declaration_list_str(&self.style).context("invalid container style")?;
        Ok(ContainerStyle::from_declarations(&block))
    }

    pub fn children(&self) -> Result<Vec<FixedSizeBox>> {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let block = Css3::parse_declaration_list_str(&item.style)
                    .with_context(|| format!("invalid style for item {idx}"))?;

                let mut child =
                    FixedSizeBox::new(FlexItemStyle::from_declarations(&block), item.content);
                if let Some(width) = item.min_content_width {
                    child = child.with_min_content_width(width);
                }
                if let Some(baseline) = item.baseline {
                    child = child.with_baseline(baseline);
                }

                Ok(child)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_flexbox::style::{FlexPack, Length};

    #[test]
    fn read_description() {
        let input = FlexInput::from_json(
            r#"{
                "available": { "width": 800, "height": 600 },
                "style": "width: 300px; flex-pack: justify",
                "items": [
                    { "style": "flex: 2; order: -1", "content": { "width": 50, "height": 20 } },
                    { "content": { "width": 10, "height": 10 }, "baseline": 8, "min_content_width": 4 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(input.available, Size::new(800.0, 600.0));

        let style = input.container_style().unwrap();
        assert_eq!(style.sizing.width, Length::Px(300.0));
        assert_eq!(style.flex_pack, FlexPack::Justify);

        let children = input.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].style.order, -1);
        assert_eq!(children[0].style.flex_positive, 2.0);
        assert_eq!(children[1].baseline, Some(8.0));
        assert_eq!(children[1].min_content_width, 4.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = FlexInput::from_json(r#"{ "available": { "width": 1, "height": 1 }, "foo": 1 }"#);
        assert!(result.is_err());
    }
}
