//! `gymtrack session ...`

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use gymtrack_core::model::{SessionFilter, WorkoutSession, WorkoutSessionPatch};
use gymtrack_engine::GymEngine;

use super::confirm;

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Log a workout session for a member
    Add {
        member_id: i64,
        /// Date as YYYY-MM-DD
        date: NaiveDate,
        workout_type: String,
        #[arg(allow_negative_numbers = true)]
        duration_minutes: i64,
    },
    /// Delete one workout session
    Delete {
        session_id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List all workout sessions
    List,
    /// Show a session with its member
    Show { session_id: i64 },
    /// Find sessions by date and/or workout type
    Find {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Case-insensitive part of the workout type
        #[arg(long = "type")]
        workout_type: Option<String>,
    },
    /// Change some fields of a session
    Update {
        session_id: i64,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long = "type")]
        workout_type: Option<String>,
        #[arg(long = "duration", allow_negative_numbers = true)]
        duration_minutes: Option<i64>,
    },
}

fn print_sessions(sessions: &[WorkoutSession], empty_message: &str) {
    if sessions.is_empty() {
        println!("{}", empty_message);
    }
    for session in sessions {
        println!("{}", session);
    }
}

pub fn execute(args: SessionArgs, engine: &mut GymEngine) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SessionCommand::Add {
            member_id,
            date,
            workout_type,
            duration_minutes,
        } => {
            let session =
                engine.create_workout_session(member_id, date, &workout_type, duration_minutes)?;
            println!(
                "Workout session added successfully with Session ID {}.",
                session.session_id
            );
        }
        SessionCommand::Delete { session_id, yes } => {
            // Fails with NotFound before prompting
            engine.get_workout_session_detail(session_id)?;
            let prompt = format!("Are you sure you want to delete session {}?", session_id);
            if !yes && !confirm(&prompt)? {
                println!("Delete canceled.");
                return Ok(());
            }
            engine.delete_workout_session(session_id)?;
            println!("Workout session {} deleted successfully.", session_id);
        }
        SessionCommand::List => {
            let sessions = engine.list_workout_sessions()?;
            print_sessions(&sessions, "No workout sessions found.");
        }
        SessionCommand::Show { session_id } => {
            let detail = engine.get_workout_session_detail(session_id)?;
            println!("Session ID: {}", detail.session.session_id);
            println!(
                "Member: {} (ID {})",
                detail.member.full_name(),
                detail.member.member_id
            );
            println!("Date: {}", detail.session.date);
            println!("Workout Type: {}", detail.session.workout_type);
            println!("Duration: {} minutes", detail.session.duration_minutes);
        }
        SessionCommand::Find { date, workout_type } => {
            let filter = SessionFilter {
                date,
                workout_type,
            };
            let sessions = engine.find_workout_sessions(&filter)?;
            print_sessions(&sessions, "No workout sessions found matching criteria.");
        }
        SessionCommand::Update {
            session_id,
            date,
            workout_type,
            duration_minutes,
        } => {
            let patch = WorkoutSessionPatch {
                date,
                workout_type,
                duration_minutes,
            };
            let session = engine.update_workout_session(session_id, &patch)?;
            println!("Workout session updated successfully.");
            println!("{}", session);
        }
    }
    Ok(())
}
