// src/drivers/mod.rs
// 信号处理各级：缓冲 → 去异常 → 归一化 → 带通 → 能量判别 → 平滑
pub mod buffer;
pub mod classifier;
pub mod error;
pub mod fft;
pub mod filter;
pub mod normalize;
pub mod outlier;
pub mod pipeline;
pub mod smoother;
pub mod source;
pub mod stats;
// 公开导出这些模块里的结构体，方便外部调用
pub use buffer::SampleBuffer;
pub use classifier::SpectralEnergyClassifier;
pub use error::PulseError;
pub use fft::{PulseSpectrum, SpectrumAnalyzer};
pub use filter::{FilterSpec, PulseBandpassFilter, TransferFunction};
pub use normalize::Normalizer;
pub use outlier::OutlierSuppressor;
pub use pipeline::{PipelineReport, ScoringPipeline};
pub use smoother::ScoreSmoother;
pub use source::{LineSource, ManualSource, Reading, SampleSource, SyntheticPulseSource};
pub use stats::WindowStats;
