mod award;
mod flush;
mod show;
mod stimulus;

pub use award::Award;
pub use flush::Flush;
pub use show::Show;
pub use stimulus::StimulusCommand;
