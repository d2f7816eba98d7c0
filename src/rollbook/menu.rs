//! The interactive numbered menu (`rollbook menu`).
//!
//! Reads answers line by line from any `BufRead` and writes prompts to any
//! `Write`, so the whole loop can be driven from a byte slice in tests.
//! Running out of input at any prompt ends the session as if "Exit" had
//! been chosen.

use crate::render::{write_messages, write_records};
use rollbook::api::{CmdResult, RollbookApi};
use rollbook::error::Result;
use rollbook::model::RollNumber;
use rollbook::store::{LoadStatus, StorageBackend};
use std::io::{BufRead, Write};

const RULE: &str = "------------------------------------------------";

pub struct Menu<'a, B: StorageBackend, R: BufRead, W: Write> {
    api: &'a mut RollbookApi<B>,
    input: R,
    out: W,
}

/// What an action left the session in.
enum Flow {
    Continue,
    Exit,
}

impl<'a, B: StorageBackend, R: BufRead, W: Write> Menu<'a, B, R, W> {
    pub fn new(api: &'a mut RollbookApi<B>, input: R, out: W) -> Self {
        Self { api, input, out }
    }

    /// Runs until the user picks Exit or input ends. The caller is
    /// responsible for the final save.
    pub fn run(mut self) -> Result<()> {
        self.greet()?;

        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };
            let flow = match choice.parse::<u32>() {
                Ok(1) => self.add()?,
                Ok(2) => self.edit()?,
                Ok(3) => self.remove()?,
                Ok(4) => self.search()?,
                Ok(5) => self.display_all()?,
                Ok(6) => Flow::Exit,
                Ok(_) => {
                    writeln!(
                        self.out,
                        "\n[Error] Invalid choice. Please select an option between 1 and 6."
                    )?;
                    Flow::Continue
                }
                Err(_) => {
                    writeln!(
                        self.out,
                        "\n[Error] Invalid input. Please enter a number for the menu option."
                    )?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.out, "\n[Info] Saving data and exiting. Goodbye!")?;
        Ok(())
    }

    fn greet(&mut self) -> Result<()> {
        let status = match self.api.load_status() {
            LoadStatus::Fresh => "[Info] Data file not found. Starting with an empty list.".to_string(),
            LoadStatus::Loaded(n) => format!("[Info] Loaded {} student(s) from file.", n),
            LoadStatus::Corrupt(reason) => format!(
                "[Persistence Error] Failed to load data. Starting with an empty list. Error: {}",
                reason
            ),
        };
        writeln!(self.out, "{}", status)?;
        writeln!(self.out, "\n--- WELCOME TO THE STUDENT MANAGEMENT SYSTEM ---")?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n{}", RULE)?;
        writeln!(self.out, "1. Add New Student")?;
        writeln!(self.out, "2. Edit Student Information")?;
        writeln!(self.out, "3. Remove Student")?;
        writeln!(self.out, "4. Search Student by Roll Number")?;
        writeln!(self.out, "5. Display All Students")?;
        writeln!(self.out, "6. Exit Application")?;
        writeln!(self.out, "{}", RULE)?;
        Ok(())
    }

    fn add(&mut self) -> Result<Flow> {
        writeln!(self.out, "\n--- Add New Student ---")?;
        let Some(name) = self.prompt_required(
            "Enter student name (required): ",
            "[Validation Error] Name cannot be empty.",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(roll) = self.prompt_roll("Enter roll number (positive integer): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(grade) = self.prompt_required(
            "Enter student grade (e.g., A, B+, Pass, required): ",
            "[Validation Error] Grade cannot be empty.",
        )?
        else {
            return Ok(Flow::Exit);
        };

        let outcome = self.api.add_student(&name, roll, &grade);
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> Result<Flow> {
        writeln!(self.out, "\n--- Edit Student Information ---")?;
        let Some(roll) = self.prompt_roll("Enter roll number of student to edit: ")? else {
            return Ok(Flow::Exit);
        };

        let Some(current) = self.api.get_student(roll) else {
            writeln!(
                self.out,
                "\n[Error] Student with Roll Number {} not found. Cannot edit.",
                roll
            )?;
            return Ok(Flow::Continue);
        };

        writeln!(self.out, "Current Name: {}", current.name())?;
        let Some(name) = self.prompt("Enter new student name (leave blank to keep current): ")?
        else {
            return Ok(Flow::Exit);
        };
        writeln!(self.out, "Current Grade: {}", current.grade())?;
        let Some(grade) = self.prompt("Enter new student grade (leave blank to keep current): ")?
        else {
            return Ok(Flow::Exit);
        };

        let outcome = self.api.edit_student(roll, Some(&name), Some(&grade));
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn remove(&mut self) -> Result<Flow> {
        writeln!(self.out, "\n--- Remove Student ---")?;
        let Some(roll) = self.prompt_roll_once("Enter roll number of student to remove: ")? else {
            return Ok(Flow::Continue);
        };
        let outcome = self.api.remove_student(roll);
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        writeln!(self.out, "\n--- Search Student ---")?;
        let Some(roll) = self.prompt_roll_once("Enter roll number of student to search: ")? else {
            return Ok(Flow::Continue);
        };
        let outcome = self.api.search_student(roll);
        if let Ok(result) = &outcome {
            if !result.listed_records.is_empty() {
                writeln!(self.out, "\n[Result] Student Found:")?;
            }
        }
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn display_all(&mut self) -> Result<Flow> {
        let outcome = self.api.list_students();
        if let Ok(result) = &outcome {
            if !result.listed_records.is_empty() {
                writeln!(self.out, "\n--- Registered Students ---")?;
            }
        }
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    /// Prints a command outcome. Store errors are shown, not propagated; only
    /// failures writing to `out` escape.
    fn report(&mut self, outcome: Result<CmdResult>) -> Result<()> {
        match outcome {
            Ok(result) => {
                write_records(&mut self.out, &result.listed_records)?;
                write_messages(&mut self.out, &result.messages)?;
            }
            Err(e) if e.is_persistence() => {
                writeln!(self.out, "[Persistence Error] Could not save data: {}", e)?;
            }
            Err(e) => writeln!(self.out, "\n[Error] {}", e)?,
        }
        Ok(())
    }

    /// One trimmed line of input, or None at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_required(&mut self, text: &str, complaint: &str) -> Result<Option<String>> {
        loop {
            let Some(value) = self.prompt(text)? else {
                return Ok(None);
            };
            if !value.is_empty() {
                return Ok(Some(value));
            }
            writeln!(self.out, "{}", complaint)?;
        }
    }

    /// Asks until a positive integer is given.
    fn prompt_roll(&mut self, text: &str) -> Result<Option<RollNumber>> {
        loop {
            let Some(value) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse_roll(&value) {
                Ok(roll) => return Ok(Some(roll)),
                Err(complaint) => writeln!(self.out, "{}", complaint)?,
            }
        }
    }

    /// Asks once; a bad answer is reported and gives None.
    fn prompt_roll_once(&mut self, text: &str) -> Result<Option<RollNumber>> {
        let Some(value) = self.prompt(text)? else {
            return Ok(None);
        };
        match parse_roll(&value) {
            Ok(roll) => Ok(Some(roll)),
            Err(complaint) => {
                writeln!(self.out, "{}", complaint)?;
                Ok(None)
            }
        }
    }
}

/// Runs a whole session and then does the final save, also when the
/// session itself failed. The session error wins if both fail.
pub fn run_and_close<B: StorageBackend, R: BufRead, W: Write>(
    mut api: RollbookApi<B>,
    input: R,
    out: W,
) -> Result<()> {
    let session = Menu::new(&mut api, input, out).run();
    let closed = api.close();
    session.and(closed)
}

fn parse_roll(value: &str) -> std::result::Result<RollNumber, &'static str> {
    match value.parse::<i64>() {
        Ok(n) if n > 0 && n <= RollNumber::MAX as i64 => Ok(n as RollNumber),
        Ok(_) => Err("[Validation Error] Roll number must be a positive integer."),
        Err(_) => Err("[Validation Error] Invalid input. Please enter a number for roll number."),
    }
}
