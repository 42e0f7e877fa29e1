//! Interactive registration session
//!
//! Owns the in-memory roster and drives the menu loop. Every failure inside
//! the loop is reported on the output stream and the loop carries on; only
//! a broken console stream ends the session early.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::string::FromUtf8Error;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::application::services::EnrollmentStore;
use crate::application::ApplicationError;
use crate::cli::output;
use crate::domain::{DomainError, Enrollment, Named, Roster};
use crate::infrastructure::{InfraError, InfraResult};

pub const MENU: &str = "\
---- Course Registration Program ----
  Select from the following menu:
    1. Register a Student for a Course
    2. Show current data
    3. Save data to a file
    4. Exit the program
-----------------------------------------";

pub const MSG_MISSING_FILE: &str = "Enrollment file must exist before running this program!";
pub const MSG_GENERIC: &str = "There was a non-specific error!";
pub const MSG_BAD_JSON: &str = "Please check that the data is a valid JSON format";
pub const MSG_BAD_VALUE: &str = "That value is not the correct type of data!";
pub const MSG_BAD_CHOICE: &str = "Error: Please, choose only 1, 2, 3, or 4";
pub const MSG_NOT_SAVED: &str = "Pending data were not saved to file!";
pub const MSG_SAVED_ON_EXIT: &str = "Unsaved data was written to JSON file!";
pub const MSG_UNSAVED_WARNING: &str = "There are registrations not yet saved.";

/// One of the four menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    ShowData,
    Save,
    Exit,
}

/// Menu input that is not one of "1" to "4".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice(pub String);

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid menu choice: {:?}", self.0)
    }
}

impl std::error::Error for InvalidChoice {}

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Register),
            "2" => Ok(Self::ShowData),
            "3" => Ok(Self::Save),
            "4" => Ok(Self::Exit),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

const REGISTRATION_PROMPTS: [&str; 3] = [
    "Enter the student's first name:",
    "Enter the student's last name:",
    "Enter the name of the course:",
];

/// A console line that could not be turned into text.
#[derive(Debug, Error)]
enum UnreadableInput {
    #[error("input ended before the registration was complete")]
    Ended,

    #[error("input is not valid UTF-8")]
    NotUtf8(#[source] FromUtf8Error),
}

/// A running registration session.
pub struct Session<R, W> {
    roster: Roster,
    store: EnrollmentStore,
    data_file: PathBuf,
    check_unsaved_on_exit: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Open a session, loading the roster from `data_file`.
    ///
    /// A missing or unreadable file is reported and the session starts empty.
    pub fn start(
        store: EnrollmentStore,
        data_file: PathBuf,
        check_unsaved_on_exit: bool,
        input: R,
        output: W,
    ) -> InfraResult<Self> {
        let mut session = Self {
            roster: Roster::new(),
            store,
            data_file,
            check_unsaved_on_exit,
            input,
            output,
        };
        let loaded = session.load_or_report().map_err(console_err)?;
        session.roster = Roster::from(loaded);
        debug!("start: {} enrollments loaded", session.roster.len());
        Ok(session)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Give back the roster and the output sink.
    pub fn into_parts(self) -> (Roster, W) {
        (self.roster, self.output)
    }

    /// Run the menu loop until the user exits or input ends.
    pub fn run(&mut self) -> InfraResult<()> {
        self.run_loop().map_err(console_err)
    }

    fn run_loop(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.read_choice()? else {
                continue;
            };
            debug!("run: dispatching {:?}", choice);
            match choice {
                MenuChoice::Register => self.register()?,
                MenuChoice::ShowData => self.show_data()?,
                MenuChoice::Save => {
                    self.save()?;
                }
                MenuChoice::Exit => {
                    self.exit_check()?;
                    return Ok(());
                }
            }
        }
    }

    pub fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", MENU)?;
        writeln!(self.output)
    }

    /// Read one menu choice.
    ///
    /// Returns `None` after reporting an invalid entry. End of input counts
    /// as choosing Exit.
    pub fn read_choice(&mut self) -> io::Result<Option<MenuChoice>> {
        output::prompt(&mut self.output, "Enter your menu choice number:")?;
        let line = match self.read_line()? {
            Ok(line) => line,
            Err(UnreadableInput::Ended) => {
                debug!("read_choice: end of input, exiting");
                writeln!(self.output)?;
                return Ok(Some(MenuChoice::Exit));
            }
            Err(e) => {
                warn!("read_choice: {}", e);
                output::error_report(&mut self.output, MSG_BAD_CHOICE, None)?;
                return Ok(None);
            }
        };
        match line.parse::<MenuChoice>() {
            Ok(choice) => Ok(Some(choice)),
            Err(e) => {
                warn!("read_choice: {}", e);
                output::error_report(&mut self.output, MSG_BAD_CHOICE, None)?;
                Ok(None)
            }
        }
    }

    /// Prompt for a student and append the enrollment.
    pub fn register(&mut self) -> io::Result<()> {
        let [first, last, course] = match self.read_registration()? {
            Ok(fields) => fields,
            Err(e) => {
                warn!("register: {}", e);
                writeln!(self.output)?;
                return output::error_report(&mut self.output, MSG_GENERIC, Some(&e));
            }
        };

        match Enrollment::new(&first, &last, &course) {
            Ok(enrollment) => {
                writeln!(self.output)?;
                output::success(
                    &mut self.output,
                    &format!(
                        "You have enrolled {} in course {}.",
                        enrollment.full_name(),
                        enrollment.course()
                    ),
                )?;
                self.roster.push(enrollment);
                Ok(())
            }
            Err(e) => self.report_validation(e),
        }
    }

    /// Print every record in its canonical text form.
    pub fn show_data(&mut self) -> io::Result<()> {
        output::framed(
            &mut self.output,
            "List of students currently registered for courses:",
        )?;
        for enrollment in &self.roster {
            output::info(&mut self.output, enrollment)?;
        }
        output::separator(&mut self.output)?;
        writeln!(self.output, "IMPORTANT")?;
        writeln!(
            self.output,
            "- Some of these registrations might not be yet saved"
        )?;
        writeln!(self.output, "- Make sure you use save registrations before exit")?;
        output::separator(&mut self.output)
    }

    /// Write the roster to the data file; shows the data on success.
    ///
    /// Returns whether the file was written.
    #[instrument(skip(self), fields(file = %self.data_file.display()))]
    pub fn save(&mut self) -> io::Result<bool> {
        match self.store.save(&self.data_file, self.roster.as_slice()) {
            Ok(()) => {
                self.show_data()?;
                Ok(true)
            }
            Err(e) => {
                warn!("save: {}", e);
                let message = match e {
                    ApplicationError::Serialize { .. } => MSG_BAD_JSON,
                    _ => MSG_GENERIC,
                };
                output::error_report(&mut self.output, message, Some(&e))?;
                Ok(false)
            }
        }
    }

    /// Offer to save when the roster differs from what is on disk.
    pub fn exit_check(&mut self) -> io::Result<()> {
        if !self.check_unsaved_on_exit {
            debug!("exit_check: disabled");
            return Ok(());
        }

        let on_disk = self.load_or_report()?;
        if self.roster.matches(&on_disk) {
            debug!("exit_check: nothing pending");
            return Ok(());
        }

        output::warning(&mut self.output, MSG_UNSAVED_WARNING)?;
        let answer = self.ask("Do you want to save the data? (y/n):")?;
        let confirmed = answer
            .map(|a| a.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false);

        if confirmed && self.save()? {
            output::separator(&mut self.output)?;
            output::success(&mut self.output, MSG_SAVED_ON_EXIT)?;
            for enrollment in &self.roster {
                writeln!(
                    self.output,
                    "{} {} {}",
                    enrollment.first_name(),
                    enrollment.last_name(),
                    enrollment.course()
                )?;
            }
            output::separator(&mut self.output)
        } else {
            output::framed(&mut self.output, MSG_NOT_SAVED)
        }
    }

    /// Load the data file, reporting failures and falling back to empty.
    fn load_or_report(&mut self) -> io::Result<Vec<Enrollment>> {
        match self.store.load(&self.data_file) {
            Ok(enrollments) => Ok(enrollments),
            Err(e) => {
                warn!("load: {}", e);
                let message = match e {
                    ApplicationError::MissingFile(_) => MSG_MISSING_FILE,
                    _ => MSG_GENERIC,
                };
                output::error_report(&mut self.output, message, Some(&e))?;
                Ok(Vec::new())
            }
        }
    }

    /// Ask for the three registration fields, stopping at the first unreadable one.
    fn read_registration(&mut self) -> io::Result<Result<[String; 3], UnreadableInput>> {
        let mut fields: [String; 3] = Default::default();
        for (field, question) in fields.iter_mut().zip(REGISTRATION_PROMPTS) {
            match self.ask(question)? {
                Ok(value) => *field = value,
                Err(e) => return Ok(Err(e)),
            }
        }
        Ok(Ok(fields))
    }

    fn report_validation(&mut self, e: DomainError) -> io::Result<()> {
        warn!("register: {}", e);
        output::error_report(&mut self.output, MSG_BAD_VALUE, Some(&e))
    }

    fn ask(&mut self, question: &str) -> io::Result<Result<String, UnreadableInput>> {
        output::prompt(&mut self.output, question)?;
        self.read_line()
    }

    /// Read one line without its line terminator.
    ///
    /// Only a failing stream is an `io::Error`; end of input and bytes that
    /// are not UTF-8 come back as `UnreadableInput` for the caller to report.
    fn read_line(&mut self) -> io::Result<Result<String, UnreadableInput>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(Err(UnreadableInput::Ended));
        }
        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }
        Ok(String::from_utf8(bytes).map_err(UnreadableInput::NotUtf8))
    }
}

fn console_err(e: io::Error) -> InfraError {
    InfraError::io("console", e)
}
