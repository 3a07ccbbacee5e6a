//! Tests for operation mode determination.

use rstest::rstest;

use crate::CldConfig;
use crate::config::OperationMode;

#[rstest]
#[case::default(CldConfig::default(), OperationMode::ExportReport)]
#[case::configure(
    CldConfig { configure: true, ..Default::default() },
    OperationMode::Configure
)]
#[case::configure_wins_over_report_id(
    CldConfig { configure: true, report_id: Some("rep-1".to_owned()), ..Default::default() },
    OperationMode::Configure
)]
fn operation_mode_follows_configure_flag(
    #[case] config: CldConfig,
    #[case] expected: OperationMode,
) {
    assert_eq!(config.operation_mode(), expected);
}
