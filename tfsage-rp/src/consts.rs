/// Distance, in bp, over which a peak's contribution halves.
pub const DEFAULT_DECAY: f64 = 10_000.0;

/// Peaks further than `WINDOW_DECAYS * decay` from a locus contribute nothing.
pub const WINDOW_DECAYS: f64 = 5.0;

pub const DEFAULT_GENOME: &str = "hg38";

/// Environment variable pointing at the directory with `<build>.len` and
/// `<build>_refseq_TSS.bed`.
pub const ASSETS_ENV_VAR: &str = "TFSAGE_ASSETS";

pub const CHROM_SIZES_SUFFIX: &str = ".len";
pub const TSS_SUFFIX: &str = "_refseq_TSS.bed";
