//! `gymtrack member ...`

use clap::{Args, Subcommand};
use gymtrack_core::model::MemberSessions;
use gymtrack_engine::GymEngine;

use super::confirm;

#[derive(Debug, Args)]
pub struct MemberArgs {
    #[command(subcommand)]
    pub command: MemberCommand,
}

#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// Register a new member
    Create {
        first_name: String,
        last_name: String,
        email: String,
    },
    /// Delete a member and all of their workout sessions
    Delete {
        member_id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List all members
    List,
    /// Show a member's workout sessions
    Sessions { member_id: i64 },
    /// Find a member by exact e-mail address
    Find { email: String },
}

pub fn execute(args: MemberArgs, engine: &mut GymEngine) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        MemberCommand::Create {
            first_name,
            last_name,
            email,
        } => {
            let member = engine.create_member(&first_name, &last_name, &email)?;
            println!(
                "Member '{}' created successfully with ID {}.",
                member.full_name(),
                member.member_id
            );
        }
        MemberCommand::Delete { member_id, yes } => {
            let member = engine.get_member(member_id)?;
            let prompt = format!(
                "Are you sure you want to delete member '{}' and all their sessions?",
                member.full_name()
            );
            if !yes && !confirm(&prompt)? {
                println!("Delete canceled.");
                return Ok(());
            }
            let deleted = engine.delete_member(member_id)?;
            println!("Member '{}' deleted successfully.", deleted.full_name());
        }
        MemberCommand::List => {
            let members = engine.list_members()?;
            if members.is_empty() {
                println!("No members found.");
            }
            for member in &members {
                println!("{}", member);
            }
        }
        MemberCommand::Sessions { member_id } => {
            let MemberSessions { member, sessions } = engine.get_member_with_sessions(member_id)?;
            println!("Workout sessions for {}:", member.full_name());
            if sessions.is_empty() {
                println!("  No workout sessions recorded.");
            }
            for s in &sessions {
                println!(
                    "  Session ID: {} | Date: {} | Type: {} | Duration: {} min",
                    s.session_id, s.date, s.workout_type, s.duration_minutes
                );
            }
        }
        MemberCommand::Find { email } => {
            let member = engine.find_member_by_email(email.trim())?;
            println!(
                "Found member: ID {} | Name: {} | Email: {}",
                member.member_id,
                member.full_name(),
                member.email
            );
        }
    }
    Ok(())
}
