//! Line codec for the flat-file stores.
//!
//! Each entity maps to one line of `;`-separated fields in a fixed order,
//! with no header row and no escaping of the delimiter within fields (a
//! field containing `;` corrupts parsing; documented limitation of the
//! store format).

use crate::types::{Appointment, Credential, Doctor, Patient};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveTime};

/// Field separator within a record line
pub const DELIMITER: char = ';';

/// Date wire format (`2099-01-01`)
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Time wire format, 24-hour (`10:00`)
pub const TIME_FMT: &str = "%H:%M";

/// An entity with a fixed delimited-line representation
pub trait Record: Sized {
    /// Exact number of fields a valid line carries
    const FIELD_COUNT: usize;

    /// Serialize into fields in canonical order
    fn to_fields(&self) -> Vec<String>;

    /// Parse from fields; `fields.len()` is already `FIELD_COUNT`
    fn from_fields(fields: &[&str]) -> Result<Self>;
}

/// Join a record's fields into its line form
pub fn encode_line<T: Record>(record: &T) -> String {
    record.to_fields().join(&DELIMITER.to_string())
}

impl Record for Credential {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.username.clone(), self.password.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        Ok(Credential {
            username: fields[0].to_string(),
            password: fields[1].to_string(),
        })
    }
}

impl Record for Patient {
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.contact.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        Ok(Patient {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            contact: fields[2].to_string(),
        })
    }
}

impl Record for Doctor {
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.specialty.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        Ok(Doctor {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            specialty: fields[2].to_string(),
        })
    }
}

impl Record for Appointment {
    // id;patientId;doctorId;date;time
    const FIELD_COUNT: usize = 5;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.patient_id.clone(),
            self.doctor_id.clone(),
            self.date.format(DATE_FMT).to_string(),
            self.time.format(TIME_FMT).to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        let id = fields[0]
            .parse::<u32>()
            .map_err(|e| Error::Parse(format!("invalid appointment id {:?}: {}", fields[0], e)))?;
        let date = NaiveDate::parse_from_str(fields[3], DATE_FMT)
            .map_err(|e| Error::Parse(format!("invalid date {:?}: {}", fields[3], e)))?;
        let time = NaiveTime::parse_from_str(fields[4], TIME_FMT)
            .map_err(|e| Error::Parse(format!("invalid time {:?}: {}", fields[4], e)))?;

        Ok(Appointment {
            id,
            patient_id: fields[1].to_string(),
            doctor_id: fields[2].to_string(),
            date,
            time,
        })
    }
}
