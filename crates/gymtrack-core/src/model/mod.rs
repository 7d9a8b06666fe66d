pub mod member;
pub mod workout_session;

pub use member::{Member, NewMember, ValidMember};
pub use workout_session::{
    MemberSessions, NewWorkoutSession, SessionFilter, ValidPatch, ValidSessionUpdate,
    ValidWorkoutSession, WorkoutSession, WorkoutSessionDetail, WorkoutSessionPatch,
};
