//! Single-line command parsing.
//!
//! A line is a command word followed by arguments. Commands that take fields use prefixed
//! arguments such as `n/Alice Tan p/91234567`; a prefix only counts when it follows
//! whitespace, so `e/` inside an email address or a URL is never mistaken for one.

use crate::commands::{
    AddCommand, ClearCommand, Command, DeleteCommand, DisplayCommand, EditCommand,
    EditPatientDescriptor, FilterCommand, FindCommand, FindMedicineCommand, ListCommand,
    LogCommand, HELP_USAGE,
};
use crate::error::{ClinicError, ClinicResult};
use crate::index::DisplayIndex;
use crate::patient::PatientRecord;
use crate::predicates::{DoctorContainsKeywords, MedicineContainsKeywords, NameContainsKeywords};
use clinic_types::{Address, Doctor, Email, FieldError, Medicine, Name, Phone, Tag};
use std::collections::{BTreeSet, HashMap};

pub const PREFIX_NAME: &str = "n/";
pub const PREFIX_PHONE: &str = "p/";
pub const PREFIX_EMAIL: &str = "e/";
pub const PREFIX_ADDRESS: &str = "a/";
pub const PREFIX_DOCTOR: &str = "d/";
pub const PREFIX_TAG: &str = "t/";
pub const PREFIX_MEDICINE: &str = "m/";

const RECORD_PREFIXES: [&str; 7] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_DOCTOR,
    PREFIX_TAG,
    PREFIX_MEDICINE,
];

const SINGLE_VALUED_PREFIXES: [&str; 5] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_DOCTOR,
];

/// Arguments split by prefix.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<&'static str, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first prefix, trimmed.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .get(prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    /// Every value given for `prefix`, in input order.
    pub fn all_values(&self, prefix: &str) -> &[String] {
        self.values.get(prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.values.contains_key(prefix)
    }

    /// Fails if any of `prefixes` was given more than once.
    pub fn verify_no_duplicate_prefixes_for(&self, prefixes: &[&str]) -> ClinicResult<()> {
        let duplicated: Vec<&str> = prefixes
            .iter()
            .copied()
            .filter(|p| self.all_values(p).len() > 1)
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(ClinicError::DuplicatePrefixes(duplicated.join(" ")))
        }
    }
}

/// True if the `d/` at `pos` is really the standalone token `d/o`.
fn is_relation_token_at(args: &str, pos: usize, prefix: &str) -> bool {
    if prefix != PREFIX_DOCTOR {
        return false;
    }
    let rest = &args[pos + prefix.len()..];
    let mut chars = rest.chars();
    chars.next() == Some('o') && chars.next().map_or(true, char::is_whitespace)
}

/// Splits `args` on the given prefixes.
pub fn tokenize(args: &str, prefixes: &[&'static str]) -> ArgumentMultimap {
    let mut positions: Vec<(usize, &'static str)> = Vec::new();
    for &prefix in prefixes {
        for (pos, _) in args.match_indices(prefix) {
            let after_whitespace = args[..pos]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
            if after_whitespace && !is_relation_token_at(args, pos, prefix) {
                positions.push((pos, prefix));
            }
        }
    }
    positions.sort_unstable_by_key(|(pos, _)| *pos);

    let preamble_end = positions.first().map_or(args.len(), |(pos, _)| *pos);
    let mut multimap = ArgumentMultimap {
        preamble: args[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };

    for (i, (pos, prefix)) in positions.iter().enumerate() {
        let start = pos + prefix.len();
        let end = positions.get(i + 1).map_or(args.len(), |(next, _)| *next);
        multimap
            .values
            .entry(*prefix)
            .or_default()
            .push(args[start..end].trim().to_string());
    }

    multimap
}

/// Parses a 1-based index made only of ASCII digits.
fn parse_index(text: &str, usage: &'static str) -> ClinicResult<DisplayIndex> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClinicError::InvalidCommandFormat(usage));
    }
    text.parse::<usize>()
        .ok()
        .and_then(DisplayIndex::from_one_based)
        .ok_or(ClinicError::InvalidCommandFormat(usage))
}

fn parse_set<T: Ord>(
    values: &[String],
    parse: impl Fn(&str) -> Result<T, FieldError>,
) -> ClinicResult<BTreeSet<T>> {
    values
        .iter()
        .map(|v| parse(v).map_err(ClinicError::from))
        .collect()
}

/// For edits, a single empty value (`t/` alone) clears the set.
fn parse_set_for_edit<T: Ord>(
    map: &ArgumentMultimap,
    prefix: &str,
    parse: impl Fn(&str) -> Result<T, FieldError>,
) -> ClinicResult<Option<BTreeSet<T>>> {
    if !map.contains(prefix) {
        return Ok(None);
    }
    let values = map.all_values(prefix);
    if values.len() == 1 && values[0].is_empty() {
        return Ok(Some(BTreeSet::new()));
    }
    parse_set(values, parse).map(Some)
}

fn parse_add(args: &str) -> ClinicResult<Command> {
    let usage = AddCommand::MESSAGE_USAGE;
    let map = tokenize(args, &RECORD_PREFIXES);

    let required = [PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS];
    if !map.preamble().is_empty() || !required.iter().all(|p| map.contains(p)) {
        return Err(ClinicError::InvalidCommandFormat(usage));
    }
    map.verify_no_duplicate_prefixes_for(&SINGLE_VALUED_PREFIXES)?;

    let record = PatientRecord::new(
        Name::new(map.value(PREFIX_NAME).unwrap_or_default())?,
        Phone::new(map.value(PREFIX_PHONE).unwrap_or_default())?,
        Email::new(map.value(PREFIX_EMAIL).unwrap_or_default())?,
        Address::new(map.value(PREFIX_ADDRESS).unwrap_or_default())?,
        Doctor::new(map.value(PREFIX_DOCTOR).unwrap_or_default())?,
        parse_set(map.all_values(PREFIX_TAG), |s| Tag::new(s))?,
        parse_set(map.all_values(PREFIX_MEDICINE), |s| Medicine::new(s))?,
    );
    Ok(Command::Add(AddCommand::new(record)))
}

fn parse_edit(args: &str) -> ClinicResult<Command> {
    let usage = EditCommand::MESSAGE_USAGE;
    let map = tokenize(args, &RECORD_PREFIXES);
    let index = parse_index(map.preamble(), usage)?;
    map.verify_no_duplicate_prefixes_for(&SINGLE_VALUED_PREFIXES)?;

    let descriptor = EditPatientDescriptor {
        name: map.value(PREFIX_NAME).map(Name::new).transpose()?,
        phone: map.value(PREFIX_PHONE).map(Phone::new).transpose()?,
        email: map.value(PREFIX_EMAIL).map(Email::new).transpose()?,
        address: map.value(PREFIX_ADDRESS).map(Address::new).transpose()?,
        doctor: map.value(PREFIX_DOCTOR).map(Doctor::new).transpose()?,
        tags: parse_set_for_edit(&map, PREFIX_TAG, |s| Tag::new(s))?,
        medicines: parse_set_for_edit(&map, PREFIX_MEDICINE, |s| Medicine::new(s))?,
    };
    if !descriptor.is_any_field_edited() {
        return Err(ClinicError::NoFieldsToEdit);
    }
    Ok(Command::Edit(EditCommand::new(index, descriptor)))
}

fn parse_filter(args: &str) -> ClinicResult<Command> {
    let usage = FilterCommand::MESSAGE_USAGE;
    let map = tokenize(args, &[PREFIX_DOCTOR]);
    if !map.preamble().is_empty() {
        return Err(ClinicError::InvalidCommandFormat(usage));
    }
    map.verify_no_duplicate_prefixes_for(&[PREFIX_DOCTOR])?;

    let doctor = map.value(PREFIX_DOCTOR).unwrap_or_default();
    if doctor.is_empty() {
        return Err(ClinicError::InvalidCommandFormat(usage));
    }
    let keywords = doctor.split_whitespace().map(str::to_string).collect();
    Ok(Command::Filter(FilterCommand::new(
        DoctorContainsKeywords::new(keywords),
    )))
}

fn parse_find(args: &str) -> ClinicResult<Command> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(ClinicError::InvalidCommandFormat(FindCommand::MESSAGE_USAGE));
    }
    Ok(Command::Find(FindCommand::new(NameContainsKeywords::new(
        keywords,
    ))))
}

fn parse_find_medicine(args: &str) -> ClinicResult<Command> {
    let args = args.trim();
    if args.is_empty() {
        return Err(ClinicError::InvalidCommandFormat(
            FindMedicineCommand::MESSAGE_USAGE,
        ));
    }

    let predicate = if args == "none" {
        MedicineContainsKeywords::no_medicines()
    } else {
        MedicineContainsKeywords::new(args.split_whitespace().map(str::to_string).collect())
    };
    Ok(Command::FindMedicine(FindMedicineCommand::new(predicate)))
}

/// Parses one line of user input into a [`Command`].
///
/// # Errors
///
/// - [`ClinicError::UnknownCommand`] for an unrecognised command word.
/// - [`ClinicError::InvalidCommandFormat`] when arguments are missing or malformed.
/// - [`ClinicError::InvalidField`] when a field value fails validation.
/// - [`ClinicError::DuplicatePrefixes`] when a single-valued field is given twice.
pub fn parse_command(line: &str) -> ClinicResult<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ClinicError::InvalidCommandFormat(HELP_USAGE));
    }

    // `args` keeps its leading whitespace so a prefix right after the command word is seen.
    let (word, args) = match line.find(char::is_whitespace) {
        Some(pos) => line.split_at(pos),
        None => (line, ""),
    };

    match word {
        AddCommand::COMMAND_WORD => parse_add(args),
        EditCommand::COMMAND_WORD => parse_edit(args),
        DeleteCommand::COMMAND_WORD => Ok(Command::Delete(DeleteCommand::new(parse_index(
            args,
            DeleteCommand::MESSAGE_USAGE,
        )?))),
        ClearCommand::COMMAND_WORD => Ok(Command::Clear(ClearCommand)),
        FindCommand::COMMAND_WORD => parse_find(args),
        FilterCommand::COMMAND_WORD => parse_filter(args),
        FindMedicineCommand::COMMAND_WORD => parse_find_medicine(args),
        ListCommand::COMMAND_WORD => Ok(Command::List(ListCommand)),
        LogCommand::COMMAND_WORD => Ok(Command::Log(LogCommand::new(parse_index(
            args,
            LogCommand::MESSAGE_USAGE,
        )?))),
        DisplayCommand::COMMAND_WORD => Ok(Command::Display(DisplayCommand::new(parse_index(
            args,
            DisplayCommand::MESSAGE_USAGE,
        )?))),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        _ => Err(ClinicError::UnknownCommand),
    }
}
