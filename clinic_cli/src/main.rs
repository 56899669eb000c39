use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use clinic_core::codec::{DATE_FMT, TIME_FMT};
use clinic_core::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic appointment scheduling system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check staff credentials
    Login { username: String, password: String },

    /// Patient registry
    Patients {
        #[command(subcommand)]
        command: PatientCommands,
    },

    /// List the doctor roster
    Doctors {
        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Book an appointment slot
    Schedule {
        doctor_id: String,
        patient_id: String,
        /// Date as YYYY-MM-DD
        date: String,
        /// Time as HH:MM (24-hour)
        time: String,
    },

    /// List a doctor's appointments
    Appointments {
        doctor_id: String,
        /// Restrict to one date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show free slots for a doctor on a date
    Slots {
        doctor_id: String,
        /// Date as YYYY-MM-DD
        date: String,
    },

    /// Cancel an appointment by id
    Cancel { appointment_id: u32 },
}

#[derive(Subcommand)]
enum PatientCommands {
    /// List registered patients
    List {
        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Register a new patient
    Add { name: String, contact: String },
}

fn main() -> ExitCode {
    clinic_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let grid = config.slots.grid()?;

    let mut repo = ClinicRepository::open(data_dir, grid)?;

    match cli.command {
        Commands::Login { username, password } => {
            if repo.login(&username, &password) {
                println!("✓ Login ok");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("✗ Login failed");
                Ok(ExitCode::FAILURE)
            }
        }

        Commands::Patients { command } => match command {
            PatientCommands::List { json } => {
                let patients = repo.list_patients();
                if json {
                    println!("{}", serde_json::to_string_pretty(&patients)?);
                } else {
                    for p in patients {
                        println!("{}  {} ({})", p.id, p.name, p.contact);
                    }
                }
                Ok(ExitCode::SUCCESS)
            }
            PatientCommands::Add { name, contact } => {
                let patient = repo.add_patient(&name, &contact)?;
                println!("✓ Registered {} as {}", patient.name, patient.id);
                Ok(ExitCode::SUCCESS)
            }
        },

        Commands::Doctors { json } => {
            let doctors = repo.list_doctors();
            if json {
                println!("{}", serde_json::to_string_pretty(&doctors)?);
            } else {
                for d in doctors {
                    println!("{}  Dr. {} ({})", d.id, d.name, d.specialty);
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Schedule {
            doctor_id,
            patient_id,
            date,
            time,
        } => {
            let date = parse_date(&date)?;
            let time = parse_time(&time)?;

            match repo.schedule(&doctor_id, date, time, &patient_id)? {
                ScheduleOutcome::Booked(appt) => {
                    println!(
                        "✓ Booked appointment {} with {} on {} at {}",
                        appt.id,
                        doctor_id,
                        appt.date.format(DATE_FMT),
                        appt.time.format(TIME_FMT)
                    );
                    Ok(ExitCode::SUCCESS)
                }
                rejected => {
                    println!(
                        "✗ Could not schedule: {}",
                        rejected.rejection_reason().unwrap_or("rejected")
                    );
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Appointments {
            doctor_id,
            date,
            json,
        } => {
            let appointments = match date {
                Some(d) => repo.appointments_for(&doctor_id, parse_date(&d)?),
                None => repo.appointments_for_doctor(&doctor_id),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&appointments)?);
            } else if appointments.is_empty() {
                println!("No appointments.");
            } else {
                for a in appointments {
                    println!(
                        "#{}  {} {}  patient {}",
                        a.id,
                        a.date.format(DATE_FMT),
                        a.time.format(TIME_FMT),
                        a.patient_id
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Slots { doctor_id, date } => {
            let date = parse_date(&date)?;
            let slots = repo.available_slots(&doctor_id, date);
            if slots.is_empty() {
                println!("No free slots.");
            } else {
                for t in slots {
                    println!("{}", t.format(TIME_FMT));
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Cancel { appointment_id } => {
            if repo.cancel(appointment_id)? {
                println!("✓ Cancelled appointment {}", appointment_id);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("✗ No appointment with id {}", appointment_id);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT)
        .map_err(|e| Error::Parse(format!("invalid date {:?} (expected YYYY-MM-DD): {}", s, e)))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FMT)
        .map_err(|e| Error::Parse(format!("invalid time {:?} (expected HH:MM): {}", s, e)))
}
