//! Scouting form for the 2025 FRC season.

use super::{FieldDefinition, FieldSchema, SchemaError};

const TEAM: &str = "Team Information";
const AUTO: &str = "Autonomous Data";
const TELEOP: &str = "Teleop Data";
const ENDGAME: &str = "Endgame";
const CAPABILITIES: &str = "Robot Capabilities";
const NOTES: &str = "Scout Notes";

pub(super) fn schema() -> Result<FieldSchema, SchemaError> {
    FieldSchema::new(vec![
        FieldDefinition::text("teamNumber", "Team Number:", TEAM)
            .numeric()
            .placeholder("e.g., 2635"),
        FieldDefinition::text("matchNumber", "Match Number:", TEAM)
            .numeric()
            .placeholder("e.g., 15"),
        FieldDefinition::text("autoPoints", "Autonomous Points:", AUTO)
            .numeric()
            .placeholder("e.g., 10"),
        FieldDefinition::boolean("autoCanScoreAlgae", "Can Score Algae in Auto:", AUTO),
        FieldDefinition::boolean("autoCanScoreCorrals", "Can Score in Corrals in Auto:", AUTO),
        FieldDefinition::text("teleopPoints", "Teleop Points:", TELEOP)
            .numeric()
            .placeholder("e.g., 30"),
        FieldDefinition::boolean("canScoreCorralsL1", "Can Score Corrals L1:", TELEOP),
        FieldDefinition::boolean("canScoreCorralsL2", "Can Score Corrals L2:", TELEOP),
        FieldDefinition::boolean("canScoreCorralsL3", "Can Score Corrals L3:", TELEOP),
        FieldDefinition::boolean("canScoreCorralsL4", "Can Score Corrals L4:", TELEOP),
        FieldDefinition::boolean("canScoreAlgae", "Can Score Algae:", TELEOP),
        FieldDefinition::boolean("defenseAbility", "Effective at Defense:", TELEOP),
        FieldDefinition::text("endgamePoints", "Endgame Points:", ENDGAME)
            .numeric()
            .placeholder("e.g., 20"),
        FieldDefinition::boolean("parkedInEndgame", "Parked in Endgame:", ENDGAME),
        FieldDefinition::boolean("climbedInEndgame", "Climbed in Endgame:", ENDGAME),
        FieldDefinition::boolean("coOpAchieved", "Co-op Objective Achieved:", ENDGAME),
        FieldDefinition::boolean(
            "canPickupCoralFromFloor",
            "Can Pick Up Corral from Floor:",
            CAPABILITIES,
        ),
        FieldDefinition::boolean(
            "canPickupCorralFromFeeder",
            "Can Pick Up from Human Player Station:",
            CAPABILITIES,
        ),
        FieldDefinition::boolean(
            "canPickupAlgaeFromFloor",
            "Can Pick Up Algae from Floor:",
            CAPABILITIES,
        ),
        FieldDefinition::boolean(
            "canPickupAlgaeFromReef",
            "Can Pick Up Algae from Reef:",
            CAPABILITIES,
        ),
        FieldDefinition::text("mobilitySpeed", "Mobility Rating (1-5):", CAPABILITIES)
            .numeric()
            .placeholder("e.g., 4"),
        FieldDefinition::text("reliabilityRating", "Reliability Rating (1-5):", CAPABILITIES)
            .numeric()
            .placeholder("e.g., 5"),
        FieldDefinition::text("scoutNotes", "Additional Notes:", NOTES)
            .placeholder("e.g., any notes"),
    ])?
    .with_summary("teamNumber", "teleopPoints")
}
