use derive_getters::{Dissolve, Getters};
use eyre::Result;

use editscope_alignment_rs::pairwise::global::{Aligner, Mode};
use editscope_alignment_rs::pairwise::scoring::Model;

use crate::classify::Classifier;
use crate::select::Selector;
use crate::Score;

/// Parameters of the read quantification.
#[derive(Clone, PartialEq, Debug, Getters, Dissolve)]
pub struct Config {
    model: Model<Score>,
    mode: Mode,
    band: Option<usize>,
    /// Gap opening discount at the cut site of each reference
    gap_incentive: Score,
    /// Maximal score difference between the two best references for a read to be called ambiguous
    margin: Score,
    /// Minimal percent of matching alignment columns for a read to count as aligned
    min_homology: f64,
    classifier: Classifier,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Model::default(),
            mode: Mode::Global,
            band: None,
            gap_incentive: 1,
            margin: 0,
            min_homology: 60.0,
            classifier: Classifier::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model(&mut self, model: Model<Score>) -> Result<&mut Self> {
        if self.gap_incentive > model.gaps().open {
            return Err(eyre::eyre!(
                "Gap opening penalty ({}) must not be below the gap incentive ({})",
                model.gaps().open,
                self.gap_incentive
            ));
        }

        self.model = model;
        Ok(self)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<&mut Self> {
        if mode != Mode::Global && self.band.is_some() {
            return Err(eyre::eyre!(
                "Banded alignment is only supported in the global mode"
            ));
        }

        self.mode = mode;
        Ok(self)
    }

    pub fn set_band(&mut self, band: Option<usize>) -> Result<&mut Self> {
        if band.is_some() && self.mode != Mode::Global {
            return Err(eyre::eyre!(
                "Banded alignment is only supported in the global mode"
            ));
        }

        self.band = band;
        Ok(self)
    }

    pub fn set_gap_incentive(&mut self, gap_incentive: Score) -> Result<&mut Self> {
        eyre::ensure!(
            gap_incentive >= 0,
            "Gap incentive must be non-negative, got {gap_incentive}"
        );
        eyre::ensure!(
            gap_incentive <= self.model.gaps().open,
            "Gap incentive ({gap_incentive}) must not exceed the gap opening penalty ({})",
            self.model.gaps().open
        );

        self.gap_incentive = gap_incentive;
        Ok(self)
    }

    pub fn set_margin(&mut self, margin: Score) -> Result<&mut Self> {
        if margin < 0 {
            return Err(eyre::eyre!(
                "Ambiguity margin must be non-negative, got {margin}"
            ));
        }

        self.margin = margin;
        Ok(self)
    }

    pub fn set_min_homology(&mut self, min_homology: f64) -> Result<&mut Self> {
        if !(0.0..=100.0).contains(&min_homology) {
            return Err(eyre::eyre!(
                "Minimum homology must be a percent in [0, 100], got {min_homology}"
            ));
        }

        self.min_homology = min_homology;
        Ok(self)
    }

    pub fn set_classifier(&mut self, classifier: Classifier) -> &mut Self {
        self.classifier = classifier;
        self
    }

    /// Fresh aligner with the configured mode and band.
    pub fn aligner(&self) -> crate::Result<Aligner<Score>> {
        let aligner = Aligner::new(self.mode);
        match self.band {
            Some(width) => Ok(aligner.with_band(width)?),
            None => Ok(aligner),
        }
    }

    pub fn selector(&self) -> crate::Result<Selector> {
        Selector::new(self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editscope_alignment_rs::pairwise::scoring::gaps::Affine;
    use editscope_alignment_rs::pairwise::scoring::symbols::{Ambiguity, Matrix};

    #[test]
    fn test_defaults() -> Result<()> {
        let config = Config::default();
        assert_eq!(config.model(), &Model::default());
        assert_eq!(*config.mode(), Mode::Global);
        assert_eq!(*config.band(), None);
        assert_eq!(*config.gap_incentive(), 1);
        assert_eq!(*config.margin(), 0);
        assert_eq!(*config.min_homology(), 60.0);
        assert!(config.classifier().ignore_ambiguous_substitutions);

        assert_eq!(config.aligner()?.mode(), Mode::Global);
        assert_eq!(config.selector()?.margin(), 0);
        Ok(())
    }

    #[test]
    fn test_setters() -> Result<()> {
        let mut config = Config::new();
        config
            .set_band(Some(10))?
            .set_margin(5)?
            .set_min_homology(75.0)?
            .set_gap_incentive(3)?;
        assert_eq!(config.aligner()?.band(), Some(10));
        assert_eq!(config.selector()?.margin(), 5);

        assert!(config.set_margin(-1).is_err());
        assert!(config.set_min_homology(101.0).is_err());
        assert!(config.set_min_homology(f64::NAN).is_err());
        assert!(config.set_gap_incentive(-1).is_err());
        assert!(config.set_gap_incentive(21).is_err());
        assert_eq!(*config.margin(), 5);
        assert_eq!(*config.gap_incentive(), 3);
        Ok(())
    }

    #[test]
    fn test_band_requires_global_mode() -> Result<()> {
        let mut config = Config::new();
        config.set_band(Some(5))?;
        assert!(config.set_mode(Mode::SemiGlobal).is_err());

        config.set_band(None)?.set_mode(Mode::SemiGlobal)?;
        assert!(config.set_band(Some(5)).is_err());
        assert_eq!(config.aligner()?.mode(), Mode::SemiGlobal);
        Ok(())
    }

    #[test]
    fn test_model_must_cover_the_incentive() -> Result<()> {
        let cheap = Model::new(
            Matrix::new(2, -1, Ambiguity::BestOf),
            Affine::new(2, 1),
        )?;

        let mut config = Config::new();
        config.set_gap_incentive(5)?;
        assert!(config.set_model(cheap.clone()).is_err());

        config.set_gap_incentive(0)?.set_model(cheap.clone())?;
        assert_eq!(config.model(), &cheap);
        Ok(())
    }
}
