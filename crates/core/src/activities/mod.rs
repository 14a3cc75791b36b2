//! Activity assignment manager - activities and who takes part in them.

mod activities_model;
mod activities_transitions;


pub use activities_model::{Activity, ActivityUpdate, NewActivity};
pub use activities_transitions::{
    add_activity, merge_scoped_assignees, remove_activity, set_activity_assignees,
    update_activity,
};

pub(crate) use activities_transitions::drop_assignee;
