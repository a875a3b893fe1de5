//! Step definitions. Compiled into each runner binary so their registrations are linked.

pub mod video_game_steps;
