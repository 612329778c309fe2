use clap::Args;
use taxcalc::api::DetailsResponse;
use taxcalc::TaxSettings;

#[derive(Args, Debug)]
pub struct DetailsCommand {}

impl DetailsCommand {
    pub fn exec(&self, settings: &TaxSettings) -> anyhow::Result<()> {
        let details = DetailsResponse::from(settings.details());
        println!("{}", serde_json::to_string_pretty(&details)?);
        Ok(())
    }
}
