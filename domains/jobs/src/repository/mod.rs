pub mod jobs;

pub use jobs::JobRepository;
