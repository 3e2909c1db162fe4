use gb_core::notice::RegistrarNotice;
use gb_core::responses::{AssignmentDto, AssignmentStudentDto, EnrollmentDto, GradeDto, SectionDto};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `gbd schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_of(args.type_name), flags.format)
}

fn schema_of(type_name: SchemaType) -> Schema {
    match type_name {
        SchemaType::Section => schema_for!(SectionDto),
        SchemaType::Assignment => schema_for!(AssignmentDto),
        SchemaType::AssignmentStudent => schema_for!(AssignmentStudentDto),
        SchemaType::Enrollment => schema_for!(EnrollmentDto),
        SchemaType::Grade => schema_for!(GradeDto),
        SchemaType::Notice => schema_for!(RegistrarNotice),
    }
}
