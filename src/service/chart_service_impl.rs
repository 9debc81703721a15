use crate::common::*;
use crate::enums::plot_kind::*;
use crate::errors::bot_error::*;
use crate::model::dataset::dataset::*;
use crate::traits::service_traits::chart_service::*;
use plotters::coord::Shift;
use plotters::prelude::*;

/* matplotlib 기본 색상 (C0) */
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const HISTOGRAM_BINS: usize = 10;
const HEATMAP_RESOLUTION: usize = 100;
const HEATMAP_LEVELS: usize = 100;
/* 보간 입력 상한: 50 x 50 셀 평균점 */
const HEATMAP_SAMPLE_CELLS: usize = 50;
const COLORBAR_WIDTH: u32 = 110;

type BitMapArea<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, new)]
pub struct ChartServiceImpl {
    width: u32,
    height: u32,
}

impl ChartServiceImpl {
    #[doc = "Axis range of `values` with 5% padding; a flat range is widened by 0.5 each side"]
    fn padded_range(values: &[f64]) -> (f64, f64) {
        let (min_val, max_val) = Self::min_max(values);

        if (max_val - min_val).abs() < f64::EPSILON {
            return (min_val - 0.5, max_val + 0.5);
        }

        let padding: f64 = (max_val - min_val) * 0.05;
        (min_val - padding, max_val + padding)
    }

    fn min_max(values: &[f64]) -> (f64, f64) {
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    #[doc = r#"
        Value range of one plotted column.

        # Errors
        `BotError::RangeTooLarge` when the span or the padded axis bounds overflow `f64`
    "#]
    pub fn checked_range(column: &str, values: &[f64]) -> Result<(f64, f64), BotError> {
        let (lo, hi) = Self::min_max(values);
        let span: f64 = hi - lo;
        let padding: f64 = span * 0.05;

        if !span.is_finite() || !(lo - padding).is_finite() || !(hi + padding).is_finite() {
            return Err(BotError::RangeTooLarge(column.to_string()));
        }

        Ok((lo, hi))
    }

    #[doc = r#"
        Equal-width bins over [min, max]. The last bin is closed so the maximum
        value is counted. A flat input uses the range min-0.5..max+0.5.
    "#]
    pub fn histogram_bins(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
        let (mut lo, mut hi) = Self::min_max(values);

        if (hi - lo).abs() < f64::EPSILON {
            lo -= 0.5;
            hi += 0.5;
        }

        let width: f64 = (hi - lo) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                start: lo + width * i as f64,
                end: lo + width * (i + 1) as f64,
                count: 0,
            })
            .collect();

        for &value in values {
            let idx: usize = (((value - lo) / width).floor() as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        bins
    }

    #[doc = r#"
        Inverse distance weighting (power 2) on normalized coordinates.
        A grid point that coincides with a sample takes the sample's value.
    "#]
    pub fn interpolate_idw(samples: &[(f64, f64, f64)], x: f64, y: f64) -> f64 {
        let mut weighted_sum: f64 = 0.0;
        let mut weight_total: f64 = 0.0;

        for &(sx, sy, sz) in samples {
            let dist_sq: f64 = (x - sx).powi(2) + (y - sy).powi(2);

            if dist_sq < 1e-12 {
                return sz;
            }

            let weight: f64 = 1.0 / dist_sq;
            weighted_sum += weight * sz;
            weight_total += weight;
        }

        weighted_sum / weight_total
    }

    #[doc = r#"
        Collapse normalized samples into one averaged point per occupied cell of a
        `cells` x `cells` grid. Interpolation cost then no longer grows with row count.
    "#]
    pub fn bin_samples(samples: &[(f64, f64, f64)], cells: usize) -> Vec<(f64, f64, f64)> {
        let mut means: Vec<(f64, f64, f64)> = vec![(0.0, 0.0, 0.0); cells * cells];
        let mut counts: Vec<usize> = vec![0; cells * cells];
        let cell_of = |v: f64| ((v * cells as f64).floor() as usize).min(cells - 1);

        for &(x, y, z) in samples {
            let idx: usize = cell_of(x) * cells + cell_of(y);
            counts[idx] += 1;

            /* 누적 평균: 합계 오버플로 없이 갱신 */
            let n: f64 = counts[idx] as f64;
            let (mx, my, mz) = &mut means[idx];
            *mx += (x - *mx) / n;
            *my += (y - *my) / n;
            *mz += (z - *mz) / n;
        }

        means
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(mean, _)| mean)
            .collect()
    }

    #[doc = "Map `z` onto one of `levels` discrete colour levels"]
    pub fn contour_level(z: f64, z_min: f64, z_max: f64, levels: usize) -> usize {
        if z_max - z_min < f64::EPSILON {
            return levels / 2;
        }

        let ratio: f64 = ((z - z_min) / (z_max - z_min)).clamp(0.0, 1.0);
        ((ratio * levels as f64).floor() as usize).min(levels - 1)
    }

    fn level_color(level: usize) -> RGBColor {
        ViridisRGB::get_color((level as f64 + 0.5) / HEATMAP_LEVELS as f64)
    }

    fn draw_scatter(root: &BitMapArea, rows: &[Vec<f64>]) -> anyhow::Result<()> {
        let xs: Vec<f64> = rows.iter().map(|r| r[0]).collect();
        let ys: Vec<f64> = rows.iter().map(|r| r[1]).collect();
        let (x_min, x_max) = Self::padded_range(&xs);
        let (y_min, y_max) = Self::padded_range(&ys);

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("X")
            .y_desc("Y")
            .axis_desc_style(("sans-serif", 18))
            .draw()?;

        chart.draw_series(
            rows.iter()
                .map(|r| Circle::new((r[0], r[1]), 4, SERIES_COLOR.filled())),
        )?;

        Ok(())
    }

    fn draw_histogram(root: &BitMapArea, rows: &[Vec<f64>]) -> anyhow::Result<()> {
        let xs: Vec<f64> = rows.iter().map(|r| r[0]).collect();
        let bins: Vec<HistogramBin> = Self::histogram_bins(&xs, HISTOGRAM_BINS);

        let x_min: f64 = bins.first().map(|b| b.start).unwrap_or(0.0);
        let x_max: f64 = bins.last().map(|b| b.end).unwrap_or(1.0);
        let max_count: usize = bins.iter().map(|b| b.count).max().unwrap_or(0);
        let y_max: f64 = (max_count as f64 * 1.05).max(1.0);

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("X")
            .y_desc("count")
            .axis_desc_style(("sans-serif", 18))
            .draw()?;

        chart.draw_series(bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                SERIES_COLOR.filled(),
            )
        }))?;

        /* 막대 테두리 */
        chart.draw_series(bins.iter().filter(|bin| bin.count > 0).map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                WHITE.stroke_width(1),
            )
        }))?;

        Ok(())
    }

    fn draw_heatmap(root: &BitMapArea, rows: &[Vec<f64>], width: u32) -> anyhow::Result<()> {
        let xs: Vec<f64> = rows.iter().map(|r| r[0]).collect();
        let ys: Vec<f64> = rows.iter().map(|r| r[1]).collect();
        let zs: Vec<f64> = rows.iter().map(|r| r[2]).collect();

        let (x_min, x_max) = Self::flat_safe_range(&xs);
        let (y_min, y_max) = Self::flat_safe_range(&ys);
        let (z_min, z_max) = Self::min_max(&zs);

        /* 축 스케일 차이를 없애기 위해 0..1 로 정규화한 좌표로 보간 */
        let x_span: f64 = x_max - x_min;
        let y_span: f64 = y_max - y_min;
        let normalized: Vec<(f64, f64, f64)> = rows
            .iter()
            .map(|r| ((r[0] - x_min) / x_span, (r[1] - y_min) / y_span, r[2]))
            .collect();
        let samples: Vec<(f64, f64, f64)> =
            Self::bin_samples(&normalized, HEATMAP_SAMPLE_CELLS);

        let cell_w: f64 = x_span / HEATMAP_RESOLUTION as f64;
        let cell_h: f64 = y_span / HEATMAP_RESOLUTION as f64;

        let mut cells: Vec<Rectangle<(f64, f64)>> =
            Vec::with_capacity(HEATMAP_RESOLUTION * HEATMAP_RESOLUTION);

        for i in 0..HEATMAP_RESOLUTION {
            for j in 0..HEATMAP_RESOLUTION {
                let gx: f64 = (i as f64 + 0.5) / HEATMAP_RESOLUTION as f64;
                let gy: f64 = (j as f64 + 0.5) / HEATMAP_RESOLUTION as f64;
                let z: f64 = Self::interpolate_idw(&samples, gx, gy);
                let level: usize = Self::contour_level(z, z_min, z_max, HEATMAP_LEVELS);

                let x0: f64 = x_min + cell_w * i as f64;
                let y0: f64 = y_min + cell_h * j as f64;
                cells.push(Rectangle::new(
                    [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                    Self::level_color(level).filled(),
                ));
            }
        }

        let split_at: u32 = width.saturating_sub(COLORBAR_WIDTH);
        let (plot_area, bar_area) = root.split_horizontally(split_at);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart.draw_series(cells)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("X")
            .y_desc("Y")
            .axis_desc_style(("sans-serif", 18))
            .draw()?;

        Self::draw_colorbar(&bar_area, z_min, z_max)?;

        Ok(())
    }

    fn flat_safe_range(values: &[f64]) -> (f64, f64) {
        let (lo, hi) = Self::min_max(values);
        if (hi - lo).abs() < f64::EPSILON {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        }
    }

    fn draw_colorbar(bar_area: &BitMapArea, z_min: f64, z_max: f64) -> anyhow::Result<()> {
        let (lo, hi) = Self::flat_safe_range(&[z_min, z_max]);
        let step: f64 = (hi - lo) / HEATMAP_LEVELS as f64;

        let mut bar = ChartBuilder::on(bar_area)
            .margin_top(20)
            .margin_bottom(70)
            .margin_left(5)
            .set_label_area_size(LabelAreaPosition::Right, 80)
            .build_cartesian_2d(0.0..1.0, lo..hi)?;

        bar.draw_series((0..HEATMAP_LEVELS).map(|level| {
            let y0: f64 = lo + step * level as f64;
            Rectangle::new(
                [(0.0, y0), (1.0, y0 + step)],
                Self::level_color(level).filled(),
            )
        }))?;

        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_desc("z value")
            .y_labels(6)
            .axis_desc_style(("sans-serif", 16))
            .draw()?;

        Ok(())
    }

    fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
        let image: image::RgbImage = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| {
                anyhow!("[ChartServiceImpl->encode_png] bitmap buffer does not match canvas size")
            })?;

        let mut png: Vec<u8> = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("[ChartServiceImpl->encode_png] PNG encoding failed")?;

        Ok(png)
    }

    fn render_blocking(
        kind: PlotKind,
        rows: &[Vec<f64>],
        width: u32,
        height: u32,
    ) -> anyhow::Result<Vec<u8>> {
        let mut buffer: Vec<u8> = vec![0; (width as usize) * (height as usize) * 3];

        {
            let root: BitMapArea =
                BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            match kind {
                PlotKind::Scatter => Self::draw_scatter(&root, rows)?,
                PlotKind::Histogram => Self::draw_histogram(&root, rows)?,
                PlotKind::Heatmap => Self::draw_heatmap(&root, rows, width)?,
            }

            root.present()?;
        }

        Self::encode_png(buffer, width, height)
    }
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    async fn render_plot(&self, kind: PlotKind, dataset: Arc<Dataset>) -> Result<Vec<u8>, BotError> {
        let rows: Vec<Vec<f64>> = dataset.numeric_rows(kind.required_columns())?;

        for (idx, column) in kind.required_columns().iter().enumerate() {
            let values: Vec<f64> = rows.iter().map(|r| r[idx]).collect();
            Self::checked_range(column, &values)?;
        }
        let (width, height) = (self.width, self.height);

        /* plotters 는 동기 코드이므로 blocking 스레드에서 그린다 */
        let handle: tokio::task::JoinHandle<Result<Vec<u8>, anyhow::Error>> =
            tokio::task::spawn_blocking(move || Self::render_blocking(kind, &rows, width, height));

        let png: Vec<u8> = handle
            .await
            .map_err(|e| {
                BotError::Render(format!(
                    "[ChartServiceImpl->render_plot] blocking task join failed (panic/cancelled): {}",
                    e
                ))
            })?
            .map_err(|e| {
                error!("[ChartServiceImpl->render_plot] drawing failed: {:?}", e);
                BotError::Render(format!("{:#}", e))
            })?;

        info!(
            "{:?} chart rendered successfully: {} bytes",
            kind,
            png.len()
        );

        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dataset::cell_value::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn dataset(headers: &[&str], rows: &[&[f64]]) -> Arc<Dataset> {
        Arc::new(
            Dataset::from_rows(
                headers.iter().map(|h| h.to_string()).collect(),
                rows.iter()
                    .map(|r| r.iter().map(|v| CellValue::Number(*v)).collect())
                    .collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn histogram_bins_count_every_value() {
        let values: Vec<f64> = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let bins: Vec<HistogramBin> = ChartServiceImpl::histogram_bins(&values, 10);

        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 11);
        /* 최댓값은 마지막 구간에 포함 */
        assert_eq!(bins[9].count, 2);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[9].end, 10.0);
    }

    #[test]
    fn histogram_of_constant_values_widens_range() {
        let bins: Vec<HistogramBin> = ChartServiceImpl::histogram_bins(&[3.0, 3.0], 10);
        assert_eq!(bins[0].start, 2.5);
        assert!((bins[9].end - 3.5).abs() < 1e-9);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn idw_hits_samples_exactly_and_blends_between() {
        let samples: Vec<(f64, f64, f64)> = vec![(0.0, 0.0, 0.0), (1.0, 0.0, 10.0)];

        assert_eq!(ChartServiceImpl::interpolate_idw(&samples, 1.0, 0.0), 10.0);

        let mid: f64 = ChartServiceImpl::interpolate_idw(&samples, 0.5, 0.0);
        assert!((mid - 5.0).abs() < 1e-9);

        let near_first: f64 = ChartServiceImpl::interpolate_idw(&samples, 0.1, 0.0);
        assert!(near_first < 5.0);
    }

    #[test]
    fn contour_levels_cover_full_range() {
        assert_eq!(ChartServiceImpl::contour_level(0.0, 0.0, 1.0, 100), 0);
        assert_eq!(ChartServiceImpl::contour_level(1.0, 0.0, 1.0, 100), 99);
        assert_eq!(ChartServiceImpl::contour_level(0.5, 0.0, 1.0, 100), 50);
        assert_eq!(ChartServiceImpl::contour_level(7.0, 7.0, 7.0, 100), 50);
    }

    #[test]
    fn padded_range_handles_single_value() {
        assert_eq!(ChartServiceImpl::padded_range(&[2.0]), (1.5, 2.5));
        let (lo, hi) = ChartServiceImpl::padded_range(&[0.0, 10.0]);
        assert!((lo + 0.5).abs() < 1e-9 && (hi - 10.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn scatter_renders_png() {
        let service: ChartServiceImpl = ChartServiceImpl::new(400, 300);
        let png: Vec<u8> = service
            .render_plot(
                PlotKind::Scatter,
                dataset(&["X", "Y"], &[&[1.0, 2.0], &[3.0, 4.0]]),
            )
            .await
            .unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[tokio::test]
    async fn histogram_renders_png() {
        let service: ChartServiceImpl = ChartServiceImpl::new(400, 300);
        let png: Vec<u8> = service
            .render_plot(
                PlotKind::Histogram,
                dataset(&["X"], &[&[1.0], &[1.5], &[2.0], &[8.0]]),
            )
            .await
            .unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[tokio::test]
    async fn heatmap_renders_png() {
        let service: ChartServiceImpl = ChartServiceImpl::new(500, 400);
        let png: Vec<u8> = service
            .render_plot(
                PlotKind::Heatmap,
                dataset(
                    &["X", "Y", "Z"],
                    &[&[0.0, 0.0, 1.0], &[1.0, 0.0, 2.0], &[0.0, 1.0, 3.0], &[1.0, 1.0, 4.0]],
                ),
            )
            .await
            .unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn checked_range_rejects_overflowing_spans() {
        assert_eq!(
            ChartServiceImpl::checked_range("X", &[1.0, 4.0]).unwrap(),
            (1.0, 4.0)
        );

        let err: BotError = ChartServiceImpl::checked_range("X", &[-1e308, 1e308]).unwrap_err();
        assert_eq!(err.to_string(), "column X value range is too large to plot");

        /* 폭은 유한하지만 여백을 더하면 넘치는 경우 */
        assert!(ChartServiceImpl::checked_range("Y", &[-f64::MAX, 0.0]).is_err());
    }

    #[test]
    fn bin_samples_keeps_sparse_points_and_averages_dense_cells() {
        let sparse: Vec<(f64, f64, f64)> = vec![(0.0, 0.0, 1.0), (1.0, 1.0, 4.0)];
        assert_eq!(ChartServiceImpl::bin_samples(&sparse, 50), sparse);

        let dense: Vec<(f64, f64, f64)> = vec![(0.001, 0.001, 2.0), (0.002, 0.002, 4.0)];
        let binned: Vec<(f64, f64, f64)> = ChartServiceImpl::bin_samples(&dense, 50);
        assert_eq!(binned.len(), 1);
        assert!((binned[0].2 - 3.0).abs() < 1e-12);

        let many: Vec<(f64, f64, f64)> = (0..100_000)
            .map(|i| {
                let t: f64 = i as f64 / 100_000.0;
                (t, (t * 37.0).fract(), t)
            })
            .collect();
        assert!(ChartServiceImpl::bin_samples(&many, 50).len() <= 50 * 50);
    }

    #[tokio::test]
    async fn huge_value_ranges_are_rejected_for_every_plot() {
        let service: ChartServiceImpl = ChartServiceImpl::new(400, 300);

        let cases: [(PlotKind, Arc<Dataset>, &str); 4] = [
            (
                PlotKind::Scatter,
                dataset(&["X", "Y"], &[&[-1e308, 1.0], &[1e308, 2.0]]),
                "X",
            ),
            (
                PlotKind::Histogram,
                dataset(&["X"], &[&[-1e308], &[1e308]]),
                "X",
            ),
            (
                PlotKind::Heatmap,
                dataset(&["X", "Y", "Z"], &[&[-1e308, 0.0, 1.0], &[1e308, 1.0, 2.0]]),
                "X",
            ),
            (
                PlotKind::Heatmap,
                dataset(&["X", "Y", "Z"], &[&[0.0, 0.0, -1e308], &[1.0, 1.0, 1e308]]),
                "Z",
            ),
        ];

        for (kind, data, column) in cases {
            let result = tokio::time::timeout(
                std::time::Duration::from_secs(10),
                service.render_plot(kind, data),
            )
            .await
            .expect("render_plot must not hang");

            assert_eq!(
                result.unwrap_err().to_string(),
                format!("column {} value range is too large to plot", column)
            );
        }
    }

    #[tokio::test]
    async fn heatmap_of_large_dataset_renders_in_bounded_time() {
        let service: ChartServiceImpl = ChartServiceImpl::new(400, 300);
        let rows: Vec<Vec<f64>> = (0..200_000)
            .map(|i| {
                let t: f64 = i as f64;
                vec![t % 1000.0, (t / 1000.0).floor(), (t * 0.01).sin()]
            })
            .collect();
        let row_refs: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let data: Arc<Dataset> = dataset(&["X", "Y", "Z"], &row_refs);

        let png: Vec<u8> = tokio::time::timeout(
            std::time::Duration::from_secs(60),
            service.render_plot(PlotKind::Heatmap, data),
        )
        .await
        .expect("heatmap render exceeded the time bound")
        .unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[tokio::test]
    async fn heatmap_without_z_reports_missing_column() {
        let service: ChartServiceImpl = ChartServiceImpl::new(400, 300);
        let err: BotError = service
            .render_plot(PlotKind::Heatmap, dataset(&["X", "Y"], &[&[1.0, 2.0]]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "missing required column: Z");
    }
}
