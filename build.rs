//! Retrieves information about the version of the simulator from Git and the
//! build environment so that it can be reported on startup.

fn main() -> shadow_rs::SdResult<()> {
    let _shadow = shadow_rs::ShadowBuilder::builder().build()?;
    Ok(())
}
