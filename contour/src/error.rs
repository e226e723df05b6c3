use std::io;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a build is already in progress; retry once it completes")]
    BuildInProgress,

    #[error("nothing to build: the batch is empty")]
    EmptyBatch,

    #[error("no build is pending")]
    NoPendingBuild,

    #[error("build worker exited without delivering its result")]
    WorkerVanished,

    #[error("couldn't spawn build worker")]
    Spawn(#[from] io::Error),
}
