use anyhow::Result;
use clap::Args;

use super::batch::BatchArgs;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub batch: BatchArgs,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let ctx = args.batch.build_context()?;
    let profile = &ctx.profile;

    println!("Plate:        {}", ctx.layout);
    println!("Microscope:   {}", ctx.config.microscope);
    println!("Tiles/frame:  {}", profile.tiles_per_frame);
    println!("Sensor bits:  {}", profile.sensor_bit_depth);
    if !profile.transform_ops.is_empty() {
        println!("Geometry:     {}", profile.transform_ops.join(" "));
    }
    println!("Fields/well:  {}", ctx.fields_per_well());
    println!("Digit width:  {}", ctx.codec.digit_width());
    println!();

    println!("Channels");
    for channel in 1..=ctx.channels() {
        println!(
            "  {}  {:<4}{}",
            channel,
            ctx.codec.channel_symbol(channel)?,
            ctx.transform_for(channel)
        );
    }
    println!();

    let groups = ctx.genotypes.groups();
    println!("Genotypes ({})", groups.len());
    for (label, wells) in groups {
        println!(
            "  {:<32}{:>4} wells  {:>6} tiles/channel",
            ctx.codec.group_name(label),
            wells,
            wells as u32 * ctx.tiles_per_well()
        );
    }

    Ok(())
}
