use crate::algebra::*;
use crate::io::{ReaderSettings, SymmetricDiagonal, MAX_LINE_LENGTH};
use crate::solver::engine::LuStrategy;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Error, Debug)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field {0}")]
    BadFieldValue(&'static str),
    /// settings file could not be read
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// settings file could not be parsed
    #[cfg(feature = "serde")]
    #[error("cannot parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for [`MatrixMarketSolver`](crate::solver::MatrixMarketSolver)

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveSettings<T: FloatT> {
    ///print matrix summary, settings and timings
    #[builder(default = "false")]
    pub verbose: bool,

    ///column ordering strategy passed to the engine
    #[builder(default = "LuStrategy::Auto")]
    pub strategy: LuStrategy,

    ///largest accepted deviation `|rhs_i - (A·x)_i|`
    #[builder(default = "(1e-10).as_T()")]
    pub tolerance: T,

    ///value of every right hand side entry
    #[builder(default = "T::one()")]
    pub rhs_value: T,

    ///maximum line length of the matrix file in bytes
    #[builder(default = "MAX_LINE_LENGTH")]
    pub max_line_length: usize,

    ///diagonal handling for symmetric matrix files
    #[builder(default = "SymmetricDiagonal::Single")]
    pub diagonal_policy: SymmetricDiagonal,
}

impl<T> Default for SolveSettings<T>
where
    T: FloatT,
{
    fn default() -> SolveSettings<T> {
        SolveSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> SolveSettings<T>
where
    T: FloatT,
{
    /// Checks that numeric fields hold usable values
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_tolerance(self.tolerance)?;
        validate_max_line_length(self.max_line_length)?;
        validate_rhs_value(self.rhs_value)?;
        Ok(())
    }

    /// settings for the matrix file reader
    pub fn reader_settings(&self) -> ReaderSettings {
        ReaderSettings {
            max_line_length: self.max_line_length,
            diagonal_policy: self.diagonal_policy,
        }
    }
}

#[cfg(feature = "serde")]
impl<T> SolveSettings<T>
where
    T: FloatT + Serialize + DeserializeOwned,
{
    /// Read settings from a JSON string.  Missing fields take
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write settings as a JSON string
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SolveSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SolveSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> SolveSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(tolerance) = self.tolerance {
            validate_tolerance(tolerance)?;
        }
        if let Some(max_line_length) = self.max_line_length {
            validate_max_line_length(max_line_length)?;
        }
        if let Some(rhs_value) = self.rhs_value {
            validate_rhs_value(rhs_value)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_tolerance<T: FloatT>(tolerance: T) -> Result<(), SettingsError> {
    if tolerance.is_finite() && tolerance > T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("tolerance"))
    }
}

fn validate_max_line_length(max_line_length: usize) -> Result<(), SettingsError> {
    if max_line_length > 0 {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("max_line_length"))
    }
}

fn validate_rhs_value<T: FloatT>(rhs_value: T) -> Result<(), SettingsError> {
    if rhs_value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("rhs_value"))
    }
}

#[test]
fn test_settings_validate() {
    let settings = SolveSettings::<f64>::default();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.tolerance, 1e-10);
    assert_eq!(settings.rhs_value, 1.0);
    assert_eq!(settings.max_line_length, 500);
    assert_eq!(settings.strategy, LuStrategy::Auto);
    assert_eq!(settings.diagonal_policy, SymmetricDiagonal::Single);

    for tolerance in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
        assert!(SolveSettingsBuilder::<f64>::default()
            .tolerance(tolerance)
            .build()
            .is_err());
    }

    assert!(SolveSettingsBuilder::<f64>::default()
        .max_line_length(0)
        .build()
        .is_err());

    let mut settings = SolveSettings::<f64>::default();
    settings.tolerance = -1.0;
    assert!(matches!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("tolerance"))
    ));
}

#[test]
fn test_settings_reader_settings() {
    let settings = SolveSettingsBuilder::<f64>::default()
        .max_line_length(64)
        .diagonal_policy(SymmetricDiagonal::Mirror)
        .build()
        .unwrap();
    let reader = settings.reader_settings();
    assert_eq!(reader.max_line_length, 64);
    assert_eq!(reader.diagonal_policy, SymmetricDiagonal::Mirror);
}

#[cfg(feature = "serde")]
#[test]
fn test_settings_json() {
    let settings =
        SolveSettings::<f64>::from_json(r#"{"verbose": true, "strategy": "Unsymmetric"}"#)
            .unwrap();
    assert!(settings.verbose);
    assert_eq!(settings.strategy, LuStrategy::Unsymmetric);
    assert_eq!(settings.tolerance, 1e-10);

    let json = settings.to_json().unwrap();
    assert_eq!(SolveSettings::<f64>::from_json(&json).unwrap(), settings);

    assert!(matches!(
        SolveSettings::<f64>::from_json(r#"{"tolerance": -1.0}"#),
        Err(SettingsError::BadFieldValue("tolerance"))
    ));
    assert!(matches!(
        SolveSettings::<f64>::from_json("{ not json"),
        Err(SettingsError::Json(_))
    ));
}
