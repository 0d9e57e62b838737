use itertools::Itertools;
use log::debug;
use plotters::{prelude::*, style::RGBColor};
use spendviz_data::{BoxStats, Segment};

const FONT: &str = "DejaVu Sans, Arial, sans-serif";
const TEXT_COLOR: RGBColor = RGBColor(38, 38, 38);
const EDGE_COLOR: RGBColor = RGBColor(61, 61, 61);
const MEDIAN_COLOR: RGBColor = RGBColor(0x22, 0x22, 0x22);
const GRID_COLOR: RGBColor = RGBColor(222, 222, 222);

/// ColorBrewer's nine class "Blues", lightest first.
const BLUES: [RGBColor; 9] = [
    RGBColor(0xf7, 0xfb, 0xff),
    RGBColor(0xde, 0xeb, 0xf7),
    RGBColor(0xc6, 0xdb, 0xef),
    RGBColor(0x9e, 0xca, 0xe1),
    RGBColor(0x6b, 0xae, 0xd6),
    RGBColor(0x42, 0x92, 0xc6),
    RGBColor(0x21, 0x71, 0xb5),
    RGBColor(0x08, 0x51, 0x9c),
    RGBColor(0x08, 0x30, 0x6b),
];

pub struct ChartOptions {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// Fraction of a category slot each box spans.
    pub box_width: f64,
    pub y_labels: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Distribution of Purchase Amounts by Customer Segment".to_string(),
            x_desc: "Customer Segment".to_string(),
            y_desc: "Purchase Amount ($)".to_string(),
            box_width: 0.6,
            y_labels: 8,
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `$1,234` style tick label, with cents only below a dollar.
pub fn currency_label(value: f64) -> String {
    if value >= 1.0 {
        format!("${}", group_thousands(value.trunc() as u64))
    } else {
        format!("${value:.2}")
    }
}

/// `count` colours sampled light to dark from the blues scale, skipping the
/// two extremes so the lightest box is still visible on white.
pub fn sequential_blues(count: usize) -> Vec<RGBColor> {
    let last = (BLUES.len() - 1) as f64;
    (1..=count)
        .map(|i| {
            let position = i as f64 / (count + 1) as f64 * last;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let t = position - lower as f64;
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            let (a, b) = (BLUES[lower], BLUES[upper]);
            RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        })
        .collect()
}

fn category_label(labels: &[&str], x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 1e-6 {
        return String::new();
    }
    labels
        .get(index as usize)
        .map(|label| label.to_string())
        .unwrap_or_default()
}

pub fn draw_segment_box_plot<'a, T>(
    backend: T,
    series: &[(Segment, BoxStats)],
    options: &ChartOptions,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'a>>
where
    T: 'a + DrawingBackend,
{
    if series.is_empty() {
        return Err("no segments to plot".into());
    }
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<&str> = series.iter().map(|(segment, _)| segment.label()).collect();
    let max_value = series
        .iter()
        .map(|(_, stats)| stats.max_value())
        .fold(0.0, f64::max);
    let y_max = if max_value > 0.0 { max_value * 1.05 } else { 1.0 };
    // one slot per segment centered on its index, labels only land on whole numbers
    let x_range = -0.5..series.len() as f64 - 0.5;

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .caption(
            &options.title,
            (FONT, 15.0)
                .into_font()
                .style(FontStyle::Bold)
                .color(&TEXT_COLOR),
        )
        .build_cartesian_2d(x_range, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(GRID_COLOR)
        .light_line_style(WHITE)
        .axis_style(EDGE_COLOR)
        .label_style((FONT, 13.0).into_font().color(&TEXT_COLOR))
        .axis_desc_style((FONT, 14.0).into_font().color(&TEXT_COLOR))
        .x_desc(options.x_desc.as_str())
        .y_desc(options.y_desc.as_str())
        .x_label_formatter(&|x| category_label(&labels, *x))
        .y_label_formatter(&|y| currency_label(*y))
        .y_labels(options.y_labels)
        .draw()?;

    let half = options.box_width / 2.0;
    let outline = EDGE_COLOR.stroke_width(2);
    for (x, ((segment, stats), fill)) in series
        .iter()
        .zip_eq(sequential_blues(series.len()))
        .enumerate()
    {
        let x = x as f64;
        debug!(
            "{segment}: median {:.2} box {:.2}..{:.2} whiskers {:.2}..{:.2} fliers {}",
            stats.median,
            stats.q1,
            stats.q3,
            stats.lower_whisker,
            stats.upper_whisker,
            stats.fliers.len()
        );
        chart.draw_series([
            PathElement::new(vec![(x, stats.q3), (x, stats.upper_whisker)], outline),
            PathElement::new(vec![(x, stats.q1), (x, stats.lower_whisker)], outline),
            PathElement::new(
                vec![
                    (x - half / 2.0, stats.upper_whisker),
                    (x + half / 2.0, stats.upper_whisker),
                ],
                outline,
            ),
            PathElement::new(
                vec![
                    (x - half / 2.0, stats.lower_whisker),
                    (x + half / 2.0, stats.lower_whisker),
                ],
                outline,
            ),
        ])?;
        chart.draw_series([
            Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], fill.filled()),
            Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], outline),
        ])?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x - half, stats.median), (x + half, stats.median)],
            MEDIAN_COLOR.stroke_width(3),
        )))?;
        chart.draw_series(
            stats
                .fliers
                .iter()
                .map(|value| Circle::new((x, *value), 2.0, EDGE_COLOR.mix(0.5).filled())),
        )?;
    }

    // To avoid the IO failure being ignored silently, we manually call the present function
    root.present()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters_svg::SVGBackend;
    use spendviz_data::{amounts_by_segment, PurchaseRecord};

    fn sample_series() -> Vec<(Segment, BoxStats)> {
        let records: Vec<PurchaseRecord> = Segment::DISPLAY_ORDER
            .iter()
            .enumerate()
            .flat_map(|(i, segment)| {
                (1..=40).map(move |n| PurchaseRecord {
                    segment: *segment,
                    amount: (i as f64 + 1.0) * 25.0 + n as f64,
                })
            })
            .chain(std::iter::once(PurchaseRecord {
                segment: Segment::Vip,
                amount: 2_500.0,
            }))
            .collect();
        amounts_by_segment(&records)
            .into_iter()
            .flat_map(|(segment, amounts)| Some((segment, BoxStats::from_values(&amounts)?)))
            .collect()
    }

    fn render_svg(series: &[(Segment, BoxStats)]) -> String {
        let mut buffer = String::new();
        {
            let backend = SVGBackend::with_string(&mut buffer, (512, 512));
            draw_segment_box_plot(backend, series, &ChartOptions::default()).unwrap();
        }
        buffer
    }

    /// x attribute of the `<text>` element whose content is `label`. plotters-svg
    /// writes the content on its own line, so it is compared trimmed.
    fn text_x(svg: &str, label: &str) -> Option<f64> {
        svg.split("</text>").find_map(|piece| {
            let (tag, content) = piece.rsplit_once('>')?;
            if content.trim() != label {
                return None;
            }
            let element = &tag[tag.rfind("<text")?..];
            let x = element.split(" x=\"").nth(1)?;
            x.split('"').next()?.parse().ok()
        })
    }

    #[test]
    fn test_text_x_reads_multiline_text() {
        let svg = "<svg>\n<text x=\"10\" y=\"5\" text-anchor=\"middle\">\nMid\n</text>\n\
                   <text x=\"42\" y=\"5\">\nVIP\n</text>\n</svg>";
        assert_eq!(text_x(svg, "Mid"), Some(10.0));
        assert_eq!(text_x(svg, "VIP"), Some(42.0));
        assert_eq!(text_x(svg, "Value"), None);
    }

    #[test]
    fn test_currency_label() {
        assert_eq!(currency_label(0.0), "$0.00");
        assert_eq!(currency_label(0.5), "$0.50");
        assert_eq!(currency_label(1.0), "$1");
        assert_eq!(currency_label(999.9), "$999");
        assert_eq!(currency_label(1234.5), "$1,234");
        assert_eq!(currency_label(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn test_sequential_blues_light_to_dark() {
        let palette = sequential_blues(4);
        assert_eq!(palette.len(), 4);
        let brightness: Vec<u32> = palette
            .iter()
            .map(|c| c.0 as u32 + c.1 as u32 + c.2 as u32)
            .collect();
        assert!(brightness.windows(2).all(|w| w[0] > w[1]), "{brightness:?}");
        assert_ne!(palette[0], BLUES[0]);
        assert_ne!(palette[3], BLUES[8]);
        assert!(sequential_blues(0).is_empty());
    }

    #[test]
    fn test_category_label() {
        let labels = ["Value", "Mid"];
        assert_eq!(category_label(&labels, 0.0), "Value");
        assert_eq!(category_label(&labels, 1.0), "Mid");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn test_axis_labels_in_display_order() {
        let svg = render_svg(&sample_series());
        let positions: Vec<f64> = Segment::DISPLAY_ORDER
            .iter()
            .map(|segment| text_x(&svg, segment.label()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert!(svg.contains("Distribution of Purchase Amounts by Customer Segment"));
        assert!(svg.contains("$0.00"));
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let mut buffer = String::new();
        let backend = SVGBackend::with_string(&mut buffer, (512, 512));
        assert!(draw_segment_box_plot(backend, &[], &ChartOptions::default()).is_err());
    }
}
