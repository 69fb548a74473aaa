#![allow(non_snake_case)]

use crate::algebra::*;
use crate::io::{read_matrix_market, ConfigurablePrintTarget, MatrixMarketError, PrintTarget};
use crate::solver::engine::{LinearSolverEngine, LuStrategy};
use crate::solver::residuals::{residual_norm, verify, VerificationError};
use crate::solver::{SolveSettings, SolverError};
use crate::timers::{timeit, Timers};
use std::collections::TryReserveError;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of a completed solve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveReport<T> {
    /// matrix dimension
    pub m: usize,
    /// number of stored triplets
    pub nnz: usize,
    /// number of entries after conversion to CSC
    pub nnz_csc: usize,
    /// `‖A·x - rhs‖∞` over the CSC matrix
    pub residual_norm: T,
    /// largest deviation `|rhs_i - (A·x)_i|` over the triplets
    pub max_deviation: T,
    /// solution vector
    pub x: Vec<T>,
}

/// Reads a Matrix Market file, solves `A x = rhs` for a constant
/// right hand side with a [`LinearSolverEngine`] and verifies the result.
///
/// Progress is written to a configurable print target, stdout by default.
pub struct MatrixMarketSolver<T, E>
where
    T: FloatT,
    E: LinearSolverEngine<T>,
{
    pub settings: SolveSettings<T>,
    engine: E,
    timers: Timers,
    output: PrintTarget,
}

impl<T, E> MatrixMarketSolver<T, E>
where
    T: FloatT,
    E: LinearSolverEngine<T>,
{
    pub fn new(engine: E, settings: SolveSettings<T>) -> Result<Self, SolverError> {
        settings.validate()?;
        Ok(Self {
            settings,
            engine,
            timers: Timers::default(),
            output: PrintTarget::default(),
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// stage timings of the most recent solve
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Solve the system stored in a Matrix Market file.
    pub fn solve_file<P: AsRef<Path>>(&mut self, path: P) -> Result<SolveReport<T>, SolverError> {
        writeln!(self.output, "... FILE: {}", path.as_ref().display())?;
        let file = File::open(path).map_err(MatrixMarketError::from)?;
        self.solve_reader(BufReader::new(file))
    }

    /// Solve the system read from a Matrix Market text stream.
    pub fn solve_reader<R: BufRead>(&mut self, reader: R) -> Result<SolveReport<T>, SolverError> {
        self.timers = Timers::default();

        if self.settings.strategy == LuStrategy::Unsymmetric {
            writeln!(self.output, "... ENFORCING UNSYMMETRIC STRATEGY")?;
        }

        let reader_settings = self.settings.reader_settings();
        let coo = timeit! {self.timers => "read";
            read_matrix_market::<T, _>(reader, &reader_settings)
        }?;
        writeln!(self.output, "... SUCCESS: matrix loaded")?;

        self.solve_stages(&coo)
    }

    /// Solve the system given by an already assembled triplet matrix.
    pub fn solve_coo(&mut self, coo: &CooMatrix<T>) -> Result<SolveReport<T>, SolverError> {
        self.timers = Timers::default();
        self.solve_stages(coo)
    }

    fn solve_stages(&mut self, coo: &CooMatrix<T>) -> Result<SolveReport<T>, SolverError> {
        if self.settings.verbose {
            self.print_configuration(coo)?;
        }

        let m = coo.dim();
        let alloc_err = |_: TryReserveError| CooError::AllocationFailed { len: m };
        let rhs = try_filled(m, self.settings.rhs_value).map_err(alloc_err)?;
        let mut x = try_filled(m, T::zero()).map_err(alloc_err)?;

        let A = timeit! {self.timers => "allocate"; CscMatrix::try_spalloc(m, m, coo.nnz())}?;
        writeln!(self.output, "... SUCCESS: CSC arrays allocated")?;

        let A = timeit! {self.timers => "convert"; A.assign_coo(coo)}?;
        writeln!(self.output, "... SUCCESS: COO converted to CSC")?;

        // factor handles are dropped at the end of this scope
        {
            let strategy = self.settings.strategy;
            let symbolic = timeit! {self.timers => "symbolic";
                self.engine.symbolic(&A, strategy)
            }?;
            writeln!(self.output, "... SUCCESS: symbolic factorization completed")?;

            let numeric = timeit! {self.timers => "numeric";
                self.engine.numeric(&symbolic, &A)
            }?;
            writeln!(self.output, "... SUCCESS: numeric factorization completed")?;

            let solved = timeit! {self.timers => "solve";
                self.engine.solve(&numeric, &mut x, &rhs)
            };
            solved?;
            writeln!(self.output, "... SUCCESS: solution calculated")?;
        }

        let resnorm = timeit! {self.timers => "residual"; residual_norm(&A, &x, &rhs)};
        writeln!(self.output, "... max_norm of residual: {:e}", resnorm)?;

        let tolerance = self.settings.tolerance;
        let verified = timeit! {self.timers => "verify"; verify(coo, &x, &rhs, tolerance)};
        let max_deviation = match verified {
            Ok(maxdev) => maxdev,
            Err(e) => {
                if let VerificationError::ToleranceExceeded {
                    index, deviation, ..
                } = e
                {
                    writeln!(
                        self.output,
                        "... ERROR: diff[{}] = {:e} is too high",
                        index, deviation
                    )?;
                }
                return Err(e.into());
            }
        };
        writeln!(
            self.output,
            "... SUCCESS: numerical solution is within tolerance"
        )?;

        if self.settings.verbose {
            writeln!(self.output, "\ntimings:")?;
            self.timers.print(&mut self.output)?;
        }

        Ok(SolveReport {
            m,
            nnz: coo.nnz(),
            nnz_csc: A.nnz(),
            residual_norm: resnorm,
            max_deviation,
            x,
        })
    }

    fn print_configuration(&mut self, coo: &CooMatrix<T>) -> std::io::Result<()> {
        let out = &mut self.output;
        let set = &self.settings;

        writeln!(out, "\nmatrix:")?;
        writeln!(out, "  dimension     = {}", coo.dim())?;
        writeln!(out, "  symmetry      = {}", _symmetry_str(coo.symmetry))?;
        writeln!(out, "  nnz (triplet) = {}", coo.nnz())?;
        writeln!(out, "  capacity      = {}", coo.capacity())?;
        writeln!(out)?;

        writeln!(out, "settings:")?;
        writeln!(
            out,
            "  linear algebra: direct / {}, precision: {} bit",
            self.engine.name(),
            _get_precision_string::<T>()
        )?;
        writeln!(
            out,
            "  strategy = {}, tolerance = {:.1e}, rhs = {}",
            set.strategy, set.tolerance, set.rhs_value
        )?;
        if !self.engine.applies_strategy(set.strategy) {
            writeln!(
                out,
                "  note: the {} engine ignores strategy = {}",
                self.engine.name(),
                set.strategy
            )?;
        }
        writeln!(
            out,
            "  max line length = {}, symmetric diagonal = {:?}",
            set.max_line_length, set.diagonal_policy
        )?;
        writeln!(out)?;
        Ok(())
    }
}

impl<T, E> ConfigurablePrintTarget for MatrixMarketSolver<T, E>
where
    T: FloatT,
    E: LinearSolverEngine<T>,
{
    fn print_to_stdout(&mut self) {
        self.output.print_to_stdout()
    }
    fn print_to_file(&mut self, file: File) {
        self.output.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.output.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.output.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.output.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.output.get_print_buffer()
    }
}

fn _symmetry_str(symmetry: MatrixSymmetry) -> &'static str {
    match symmetry {
        MatrixSymmetry::General => "general",
        MatrixSymmetry::Symmetric => "symmetric",
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}
