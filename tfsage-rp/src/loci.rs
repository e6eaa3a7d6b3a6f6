//! Gene locus sets: TSS positions of one genome build, annotated with gene names.

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tfsage_core::models::{Genome, RegionSet};

use crate::consts::{ASSETS_ENV_VAR, CHROM_SIZES_SUFFIX, TSS_SUFFIX};
use crate::errors::{Result, RpError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenomeBuild {
    Hg38,
    Mm10,
}

impl GenomeBuild {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenomeBuild::Hg38 => "hg38",
            GenomeBuild::Mm10 => "mm10",
        }
    }

    pub fn chrom_sizes_file(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(format!("{}{}", self.as_str(), CHROM_SIZES_SUFFIX))
    }

    pub fn tss_file(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(format!("{}{}", self.as_str(), TSS_SUFFIX))
    }
}

impl FromStr for GenomeBuild {
    type Err = RpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hg38" => Ok(GenomeBuild::Hg38),
            "mm10" => Ok(GenomeBuild::Mm10),
            _ => Err(RpError::UnsupportedGenome(s.to_string())),
        }
    }
}

impl Display for GenomeBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Pick the assets directory: an explicit path wins, then the
/// `TFSAGE_ASSETS` environment variable.
///
pub fn resolve_assets_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    std::env::var_os(ASSETS_ENV_VAR)
        .map(PathBuf::from)
        .ok_or(RpError::MissingAssetsDir(ASSETS_ENV_VAR))
}

///
/// Transcription start sites of a genome, each annotated with a gene name.
///
/// Locus order is file order and defines the row order of every RP vector
/// and matrix computed against this set. Never mutated after construction.
///
#[derive(Debug, Clone)]
pub struct GeneLocusSet {
    pub genome: Genome,
    pub loci: RegionSet,
    names: Vec<String>,
}

impl GeneLocusSet {
    pub fn new(genome: Genome, loci: RegionSet) -> Result<Self> {
        let names = loci
            .regions
            .iter()
            .map(|r| {
                r.annotation()
                    .map(str::to_string)
                    .ok_or_else(|| RpError::MissingGeneName(r.to_string()))
            })
            .collect::<Result<Vec<String>>>()?;

        Ok(GeneLocusSet {
            genome,
            loci,
            names,
        })
    }

    pub fn from_files<P: AsRef<Path>>(chrom_sizes: P, tss: P) -> Result<Self> {
        let genome = Genome::try_from(chrom_sizes.as_ref())?;
        let loci = RegionSet::try_from(tss.as_ref())?;
        GeneLocusSet::new(genome, loci)
    }

    ///
    /// Load the bundled loci of a supported build from `assets_dir`.
    ///
    pub fn load(build: GenomeBuild, assets_dir: &Path) -> Result<Self> {
        log::info!("Loading {} gene loci from {}", build, assets_dir.display());
        let set = GeneLocusSet::from_files(
            build.chrom_sizes_file(assets_dir),
            build.tss_file(assets_dir),
        )?;
        log::info!("Loaded {} loci on {} chromosomes", set.len(), set.genome.len());
        Ok(set)
    }

    /// Gene names, in locus order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn assets_dir() -> PathBuf {
        std::env::current_dir().unwrap().join("../tests/data/assets")
    }

    #[rstest]
    #[case("hg38", GenomeBuild::Hg38)]
    #[case("MM10", GenomeBuild::Mm10)]
    fn test_parse_build(#[case] name: &str, #[case] expected: GenomeBuild) {
        assert_eq!(name.parse::<GenomeBuild>().unwrap(), expected);
    }

    #[rstest]
    fn test_unsupported_build() {
        assert!(matches!(
            "hg19".parse::<GenomeBuild>(),
            Err(RpError::UnsupportedGenome(_))
        ));
    }

    #[rstest]
    fn test_load_keeps_locus_order() {
        let set = GeneLocusSet::load(GenomeBuild::Hg38, &assets_dir()).unwrap();
        assert_eq!(set.names(), &["GENE_A", "GENE_B", "GENE_C", "GENE_D"]);
        assert_eq!(set.genome.length("chrX"), Some(156040895));
    }

    #[rstest]
    fn test_missing_gene_name() {
        let dir = tempfile::tempdir().unwrap();
        let tss = dir.path().join("tss.bed");
        std::fs::write(&tss, "chr1\t10\t11\n").unwrap();
        let result = GeneLocusSet::from_files(assets_dir().join("hg38.len"), tss);
        assert!(matches!(result, Err(RpError::MissingGeneName(_))));
    }

    #[rstest]
    fn test_explicit_assets_dir_wins() {
        let dir = assets_dir();
        assert_eq!(resolve_assets_dir(Some(&dir)).unwrap(), dir);
    }
}
