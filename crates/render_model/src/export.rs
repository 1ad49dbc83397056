//! Export boundary
//!
//! Encoding a rendered card into an image file happens outside this crate.
//! A [`Rasterizer`] receives the finished [`SideRender`] as its drawable
//! region and produces whatever output it likes.

use crate::{RenderError, Result, SideRender, StaticRenderer};
use card_model::{CardSide, CardTemplate, DataContext, Face};

/// Draws a rendered side onto some target
pub trait Rasterizer {
    type Output;
    type Error: std::fmt::Display;

    fn rasterize(&mut self, render: &SideRender) -> std::result::Result<Self::Output, Self::Error>;
}

fn check_surface(width: f64, height: f64) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(RenderError::InvalidSurface { width, height })
    }
}

/// Render one side and hand it to a rasterizer
pub fn export_side<R: Rasterizer>(
    renderer: &StaticRenderer,
    rasterizer: &mut R,
    side: &CardSide,
    ctx: &DataContext,
    width: f64,
    height: f64,
) -> Result<R::Output> {
    check_surface(width, height)?;

    let render = renderer.render(side, ctx, width, height);
    rasterizer.rasterize(&render).map_err(|e| {
        tracing::warn!("Rasterizer failed: {}", e);
        RenderError::Export(e.to_string())
    })
}

/// Export both faces of a template, front first
pub fn export_template<R: Rasterizer>(
    renderer: &StaticRenderer,
    rasterizer: &mut R,
    template: &CardTemplate,
    ctx: &DataContext,
    width: f64,
    height: f64,
) -> Result<Vec<(Face, R::Output)>> {
    [Face::Front, Face::Back]
        .into_iter()
        .map(|face| {
            let output =
                export_side(renderer, rasterizer, template.side(face), ctx, width, height)?;
            Ok((face, output))
        })
        .collect()
}
