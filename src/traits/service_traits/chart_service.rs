use crate::common::*;

use crate::enums::plot_kind::*;

use crate::errors::bot_error::*;

use crate::model::dataset::dataset::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = "
        Render the requested plot of `dataset` into an in-memory PNG
        # Arguments
        * `kind` - Scatter / Histogram / Heatmap
        * `dataset` - Dataset holding the `X`, `Y`, `Z` columns the plot needs
        # Returns
        * PNG encoded bytes
    "]
    async fn render_plot(&self, kind: PlotKind, dataset: Arc<Dataset>) -> Result<Vec<u8>, BotError>;
}
