use crate::common::*;

#[doc = "봇이 인식하는 명령 토큰"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommandKind {
    SetDataset,
    PlotScatter,
    PlotHist,
    PlotHeatmap,
}

impl BotCommandKind {
    pub const ALL: [BotCommandKind; 4] = [
        BotCommandKind::SetDataset,
        BotCommandKind::PlotScatter,
        BotCommandKind::PlotHist,
        BotCommandKind::PlotHeatmap,
    ];

    #[doc = "슬래시를 제외한 명령 이름"]
    pub fn name(&self) -> &'static str {
        match self {
            BotCommandKind::SetDataset => "set_dataset",
            BotCommandKind::PlotScatter => "plot_scatter",
            BotCommandKind::PlotHist => "plot_hist",
            BotCommandKind::PlotHeatmap => "plot_heatmap",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BotCommandKind::SetDataset => "set a dataset (attach a CSV file)",
            BotCommandKind::PlotScatter => "plot a scatter",
            BotCommandKind::PlotHist => "plot a histogram",
            BotCommandKind::PlotHeatmap => "plot a heatmap",
        }
    }

    #[doc = r#"
        메시지 본문(또는 캡션)이 명령 토큰과 정확히 일치할 때만 명령으로 인식한다.
        대소문자를 구분하고, 인자나 `@botname` 접미사가 붙으면 인식하지 않는다.
    "#]
    pub fn parse(text: &str) -> Option<Self> {
        let name: &str = text.strip_prefix('/')?;
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }

    #[doc = "setMyCommands 로 등록할 명령 메뉴"]
    pub fn menu() -> Vec<BotCommand> {
        Self::ALL
            .iter()
            .map(|cmd| BotCommand::new(cmd.name(), cmd.description()))
            .collect()
    }
}

impl Display for BotCommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}
