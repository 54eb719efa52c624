/// Concurrency management.
/// Configures the thread pool used by the parallel batch path.

use anyhow::Result;

/// Initialize the global rayon thread pool with controlled worker count.
/// Caps workers at half the cores so parallel conversions leave headroom
/// for the Python dump subprocesses they spawn.
pub fn init_thread_pool() -> Result<()> {
    let cores = num_cpus::get();
    let workers = std::cmp::max(1, cores / 2);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()?;

    println!(
        "[py2ts] Initialized thread pool: {} workers (system has {} cores)",
        workers, cores
    );

    Ok(())
}
