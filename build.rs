use vergen_gitcl::{BuildBuilder, CargoBuilder, Emitter, GitclBuilder, RustcBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let git = GitclBuilder::default()
        .describe(true, true, None)
        .sha(true)
        .branch(true)
        .dirty(true)
        .build()?;
    let cargo = CargoBuilder::default().target_triple(true).build()?;
    let rustc = RustcBuilder::default().semver(true).build()?;
    let build = BuildBuilder::default().build_timestamp(true).build()?;

    Emitter::default()
        .add_instructions(&git)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .add_instructions(&build)?
        .emit()?;

    Ok(())
}
