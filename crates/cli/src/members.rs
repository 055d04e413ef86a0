use crate::view::MemberView;
use chainscope_api::models::TypeRef;
use chainscope_core::oracle::{InMemoryTypeOracle, InvocationSite, TypeOracle};
use clap::Args;
use std::path::PathBuf;
use tabled::{Table, settings::Style};

#[derive(Args, Debug, Clone)]
pub struct MembersArgs {
    /// JSON type model
    #[arg(long, value_name = "MODEL_JSON")]
    pub model: PathBuf,
    /// Fully qualified name of the type to inspect
    #[arg(long = "type", value_name = "FQN")]
    pub type_fqn: String,
    /// List static members instead of instance members
    #[arg(long = "static")]
    pub static_members: bool,
    /// Type from which visibility is judged; defaults to the inspected type
    #[arg(long, value_name = "FQN")]
    pub from: Option<String>,
}

pub async fn run(args: MembersArgs) -> Result<(), Box<dyn std::error::Error>> {
    let oracle = InMemoryTypeOracle::load(&args.model)?;
    let from = args.from.as_deref().unwrap_or(&args.type_fqn);
    let site = oracle
        .resolve_invocation_site(from)
        .unwrap_or_else(|| InvocationSite::new(from));

    let ty = TypeRef::id(&args.type_fqn);
    let members = if args.static_members {
        oracle.visible_static_members(&ty, &site)?
    } else {
        oracle.visible_instance_members(&ty, &site)?
    };

    if members.is_empty() {
        println!("No visible members.");
        return Ok(());
    }
    let views: Vec<MemberView> = members.iter().map(MemberView::from_member).collect();
    println!("{}", Table::new(&views).with(Style::psql()));
    Ok(())
}
