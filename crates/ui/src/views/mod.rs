mod error;
mod interview;
mod review;

pub use error::ViewError;
pub use interview::InterviewView;
pub use review::ReviewPanel;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
