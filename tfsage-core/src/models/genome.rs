use std::path::Path;

use fxhash::FxHashMap;

use crate::errors::{RegionSetError, Result};
use crate::models::{Region, RegionSet};
use crate::utils::read_chrom_sizes;

///
/// Chromosome lengths for one genome build, in the order of the sizes file.
///
#[derive(Clone, Debug, Default)]
pub struct Genome {
    chromosomes: Vec<(String, u32)>,
    lookup: FxHashMap<String, usize>,
}

impl Genome {
    pub fn new(chromosomes: Vec<(String, u32)>) -> Self {
        let lookup = chromosomes
            .iter()
            .enumerate()
            .map(|(i, (chr, _))| (chr.clone(), i))
            .collect();
        Genome {
            chromosomes,
            lookup,
        }
    }

    pub fn length(&self, chr: &str) -> Option<u32> {
        self.lookup.get(chr).map(|&i| self.chromosomes[i].1)
    }

    pub fn contains(&self, chr: &str) -> bool {
        self.lookup.contains_key(chr)
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &(String, u32)> {
        self.chromosomes.iter()
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    ///
    /// Check that a region sits on a known chromosome and inside `[0, length]`.
    ///
    pub fn check_region(&self, region: &Region) -> Result<()> {
        let length = self
            .length(&region.chr)
            .ok_or_else(|| RegionSetError::UnknownChromosome(region.chr.clone()))?;

        if region.end > length {
            return Err(RegionSetError::RegionOutOfBounds {
                chr: region.chr.clone(),
                start: region.start,
                end: region.end,
                length,
            });
        }
        Ok(())
    }

    ///
    /// Validate every region of a set against this genome.
    ///
    /// With `strict_bounds` off nothing is checked: regions on unknown
    /// chromosomes or hanging past a chromosome end are tolerated and simply
    /// never meet a locus.
    ///
    pub fn check_region_set(&self, region_set: &RegionSet, strict_bounds: bool) -> Result<()> {
        if !strict_bounds {
            return Ok(());
        }
        region_set
            .regions
            .iter()
            .try_for_each(|region| self.check_region(region))
    }
}

impl TryFrom<&Path> for Genome {
    type Error = RegionSetError;

    ///
    /// Create a [Genome] from a `chrom<TAB>length` file.
    ///
    fn try_from(value: &Path) -> Result<Self> {
        Ok(Genome::new(read_chrom_sizes(value)?))
    }
}
