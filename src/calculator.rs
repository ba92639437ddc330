use std::{
    convert::TryFrom,
    io::{self, BufRead, ErrorKind, Write},
};

use tracing::{debug, info};

#[derive(thiserror::Error, Debug)]
pub enum CalcError {
    #[error("Invalid number")]
    InvalidNumber,
    #[error("Invalid operator")]
    InvalidOperator,
    #[error("Error: Division by zero")]
    DivisionByZero,
    #[error("Invalid input")]
    InvalidInput,
    #[error("End of input")]
    EndOfInput,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn eval(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        let result = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        Ok(result)
    }
}

impl TryFrom<&str> for Operator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            "/" => Ok(Self::Divide),
            _ => Err(CalcError::InvalidOperator),
        }
    }
}

/// What a prompt is asking for. Decides which diagnostic a malformed line gets.
#[derive(Clone, Copy, Debug)]
enum Field {
    Number,
    Operator,
    Answer,
}

impl Field {
    fn malformed(self) -> CalcError {
        match self {
            Self::Number => CalcError::InvalidNumber,
            Self::Operator => CalcError::InvalidOperator,
            Self::Answer => CalcError::InvalidInput,
        }
    }
}

/// Interactive read-compute-print session over any line-oriented input.
///
/// Every diagnostic aborts the current iteration and starts over at the first
/// operand. The session ends when the user answers anything but `yes` or when
/// the input is exhausted.
#[derive(Debug)]
pub struct Calculator<R, W> {
    keep_running: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Calculator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            keep_running: true,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<(), CalcError> {
        while self.keep_running {
            match self.step() {
                Ok(()) => {}
                Err(CalcError::EndOfInput) => {
                    info!("input exhausted, ending session");
                    self.keep_running = false;
                }
                Err(err @ CalcError::Io(_)) => {
                    return Err(err);
                }
                Err(diagnostic) => {
                    debug!(%diagnostic, "restarting iteration");
                    writeln!(self.output, "{}", diagnostic)?;
                }
            }
        }

        info!("session finished");
        self.output.flush()?;
        Ok(())
    }

    fn step(&mut self) -> Result<(), CalcError> {
        let lhs = self.read_number("Enter first number:")?;
        let token = self.prompt("Enter operator (+, -, *, /):", Field::Operator)?;
        let rhs = self.read_number("Enter second number:")?;

        let operator = Operator::try_from(token.as_str())?;
        let result = operator.eval(lhs, rhs)?;
        debug!(?operator, lhs, rhs, result, "evaluated");
        writeln!(self.output, "Result: {}", result)?;

        let answer = self.prompt("Do you want to continue? (yes/no)", Field::Answer)?;
        self.keep_running = answer.trim().to_lowercase() == "yes";
        Ok(())
    }

    fn read_number(&mut self, text: &str) -> Result<f64, CalcError> {
        let line = self.prompt(text, Field::Number)?;
        let value = line
            .trim()
            .parse::<f64>()
            .map_err(|_| CalcError::InvalidNumber)?;
        debug!(value, "read number");
        Ok(value)
    }

    /// Prints `text` and consumes exactly one line of input, returned without
    /// its line terminator.
    fn prompt(&mut self, text: &str, field: Field) -> Result<String, CalcError> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        match self.input.read_until(b'\n', &mut buf) {
            Ok(0) => return Err(CalcError::EndOfInput),
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                return Err(field.malformed());
            }
            Err(err) => return Err(err.into()),
        }

        let line = String::from_utf8(buf).map_err(|_| field.malformed())?;
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}
