use crate::enums::bot_command_kind::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    Scatter,
    Histogram,
    Heatmap,
}

impl PlotKind {
    pub fn from_command(command: BotCommandKind) -> Option<Self> {
        match command {
            BotCommandKind::PlotScatter => Some(PlotKind::Scatter),
            BotCommandKind::PlotHist => Some(PlotKind::Histogram),
            BotCommandKind::PlotHeatmap => Some(PlotKind::Heatmap),
            BotCommandKind::SetDataset => None,
        }
    }

    #[doc = "플롯에 필요한 컬럼 (검증 순서대로)"]
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            PlotKind::Scatter => &["X", "Y"],
            PlotKind::Histogram => &["X"],
            PlotKind::Heatmap => &["X", "Y", "Z"],
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            PlotKind::Scatter => "scatter.png",
            PlotKind::Histogram => "hist.png",
            PlotKind::Heatmap => "heatmap.png",
        }
    }
}
