use plotters_svg::SVGBackend;
use resvg::{
    tiny_skia,
    usvg::{self, fontdb, Options, TreeParsing, TreeTextToPath},
};
use spendviz_data::{amounts_by_segment, BoxStats, PurchaseRecord, Segment};
use tracing::debug;

use crate::{config::ChartConfig, error::RenderError};

fn box_series(records: &[PurchaseRecord]) -> Vec<(Segment, BoxStats)> {
    amounts_by_segment(records)
        .into_iter()
        .flat_map(|(segment, amounts)| {
            debug!("{segment}: {} purchases", amounts.len());
            Some((segment, BoxStats::from_values(&amounts)?))
        })
        .collect()
}

pub(crate) fn render_svg(
    records: &[PurchaseRecord],
    config: &ChartConfig,
) -> Result<String, RenderError> {
    let series = box_series(records);
    let mut buffer = String::new();
    {
        let backend = SVGBackend::with_string(&mut buffer, config.size);
        if let Err(e) = spendviz_charts::draw_segment_box_plot(backend, &series, &config.chart) {
            return Err(RenderError::Draw(e.to_string()));
        }
    }
    Ok(buffer)
}

/// Rasterizes an svg document onto a `size` pixmap, drawing text with the system fonts.
pub(crate) fn rasterize(svg: &str, size: (u32, u32)) -> Result<Vec<u8>, RenderError> {
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    debug!("loaded {} font faces", fontdb.len());

    let mut tree = usvg::Tree::from_str(svg, &Options::default())?;
    tree.convert_text(&fontdb);
    let rtree = resvg::Tree::from_usvg(&tree);
    let (width, height) = size;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Pixmap(width, height))?;
    rtree.render(tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Png(e.to_string()))
}

pub(crate) fn render_png(
    records: &[PurchaseRecord],
    config: &ChartConfig,
) -> Result<Vec<u8>, RenderError> {
    let svg = render_svg(records, config)?;
    rasterize(&svg, config.size)
}
