//! generate command - Render a filename or path from DRS metadata

use crate::cli::Context;
use crate::core::extract::Encoding;
use crate::core::fields::Field;
use crate::core::record::Cmip5File;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Inputs to [`generate`].
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Encoding to produce
    pub to: Encoding,
    /// Standard CMOR path to start from
    pub from_cmor_fp: Option<String>,
    /// Datanode path to start from
    pub from_datanode_fp: Option<String>,
    /// CMOR filename to start from
    pub from_cmor_fname: Option<String>,
    /// `FIELD=VALUE` assignments; empty values delete
    pub assignments: Vec<(String, String)>,
    /// Fields to delete
    pub unset: Vec<String>,
}

/// Assemble a record and return its rendering in `request.to`.
///
/// Order: extracted source, config defaults for still-unset fields,
/// assignments, then deletions.
pub fn generate(ctx: &Context, request: &GenerateRequest) -> Result<String> {
    let mut record = source_record(ctx, request)?;

    let defaults: Vec<(&str, &str)> = ctx
        .config
        .defaults()
        .filter(|(name, _)| match name.parse::<Field>() {
            Ok(field) => !record.contains(field),
            Err(_) => true,
        })
        .collect();
    if !defaults.is_empty() {
        output::debug(
            format!("Applying {} default(s) from config", defaults.len()),
            ctx.verbosity,
        );
        record
            .update(defaults)
            .context("Invalid [defaults] in config")?;
    }

    record
        .update(request.assignments.iter().map(|(k, v)| (k, v.as_str())))
        .context("Failed to apply --set")?;
    record
        .delete(&request.unset)
        .context("Failed to apply --unset")?;

    output::debug(format!("Record: {}", record), ctx.verbosity);

    record
        .generate(request.to)
        .with_context(|| format!("Cannot generate {}", request.to))
}

fn source_record(ctx: &Context, request: &GenerateRequest) -> Result<Cmip5File> {
    let builder = Cmip5File::builder();
    let builder = match &request.from_cmor_fp {
        Some(raw) => builder.cmor_fp(raw.as_str()),
        None => builder,
    };
    let builder = match &request.from_datanode_fp {
        Some(raw) => builder.datanode_fp(raw.as_str()),
        None => builder,
    };
    let builder = match &request.from_cmor_fname {
        Some(raw) => builder.cmor_fname(raw.as_str()),
        None => builder,
    };

    let supplied = [
        &request.from_cmor_fp,
        &request.from_datanode_fp,
        &request.from_cmor_fname,
    ]
    .iter()
    .filter(|s| s.as_deref().is_some_and(|s| !s.is_empty()))
    .count();

    if let Some((encoding, raw)) = builder.selected_source() {
        if supplied > 1 {
            output::warn(
                format!("Several sources given; using {} '{}'", encoding, raw),
                ctx.verbosity,
            );
        }
        output::debug(format!("Extracting {} '{}'", encoding, raw), ctx.verbosity);
    }

    builder.build().context("Failed to read source")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Config, GlobalConfig};
    use crate::ui::output::Verbosity;

    const FNAME: &str = "tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc";

    fn ctx() -> Context {
        Context {
            verbosity: Verbosity::Quiet,
            config: Config::default(),
        }
    }

    fn ctx_with_defaults(defaults: &[(&str, &str)]) -> Context {
        Context {
            verbosity: Verbosity::Quiet,
            config: Config::from_global(GlobalConfig {
                output: None,
                defaults: Some(
                    defaults
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            }),
        }
    }

    fn request(to: Encoding) -> GenerateRequest {
        GenerateRequest {
            to,
            from_cmor_fp: None,
            from_datanode_fp: None,
            from_cmor_fname: None,
            assignments: Vec::new(),
            unset: Vec::new(),
        }
    }

    #[test]
    fn filename_round_trip() {
        let mut req = request(Encoding::CmorFname);
        req.from_cmor_fname = Some(FNAME.into());
        assert_eq!(generate(&ctx(), &req).unwrap(), FNAME);
    }

    #[test]
    fn assignments_and_unset_apply_in_order() {
        let mut req = request(Encoding::CmorFname);
        req.from_cmor_fname = Some(FNAME.into());
        req.assignments = vec![
            ("t_start".into(), "200001".into()),
            ("temporal_suffix".into(), "clim".into()),
        ];
        req.unset = vec!["geographical_info".into()];
        assert_eq!(
            generate(&ctx(), &req).unwrap(),
            "tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200001-210012-clim.nc"
        );
    }

    #[test]
    fn defaults_fill_missing_path_segments() {
        let ctx = ctx_with_defaults(&[
            ("activity", "CMIP5"),
            ("product", "output1"),
            ("institute", "MOHC"),
            ("frequency", "mon"),
            ("modeling_realm", "atmos"),
            ("model", "ignored-because-extracted"),
        ]);
        let mut req = request(Encoding::CmorFp);
        req.from_cmor_fname = Some(FNAME.into());

        let path = generate(&ctx, &req).unwrap();
        let expected = std::path::Path::new(
            "CMIP5/output1/MOHC/HadGEM2-ES/rcp45/mon/atmos/tas/r1i1p1",
        )
        .join(FNAME);
        assert_eq!(path, expected.to_string_lossy());
    }

    #[test]
    fn defaults_keep_extracted_temporal_subset() {
        let ctx = ctx_with_defaults(&[("temporal_subset", "190001-190012")]);
        let mut req = request(Encoding::CmorFname);
        req.from_cmor_fname = Some(FNAME.into());
        assert_eq!(generate(&ctx, &req).unwrap(), FNAME);

        req.from_cmor_fname = Some("tas_Amon_HadGEM2-ES_rcp45_r1i1p1.nc".into());
        assert_eq!(
            generate(&ctx, &req).unwrap(),
            "tas_Amon_HadGEM2-ES_rcp45_r1i1p1_190001-190012.nc"
        );
    }

    #[test]
    fn derived_default_does_not_override_source() {
        let ctx = ctx_with_defaults(&[("t_start", "190001")]);
        let mut req = request(Encoding::CmorFname);
        req.from_cmor_fname = Some(FNAME.into());
        assert_eq!(generate(&ctx, &req).unwrap(), FNAME);
    }

    #[test]
    fn missing_field_reported() {
        let mut req = request(Encoding::DatanodeFp);
        req.from_cmor_fname = Some(FNAME.into());
        let err = generate(&ctx(), &req).unwrap_err();
        assert!(format!("{err:#}").contains("missing field: activity"));
    }

    #[test]
    fn unknown_assignment_rejected() {
        let mut req = request(Encoding::CmorFname);
        req.from_cmor_fname = Some(FNAME.into());
        req.assignments = vec![("realm".into(), "atmos".into())];
        let err = generate(&ctx(), &req).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field: realm"));
    }

    #[test]
    fn bad_source_reported() {
        let mut req = request(Encoding::CmorFname);
        req.from_cmor_fname = Some("notes.txt".into());
        let err = generate(&ctx(), &req).unwrap_err();
        assert!(format!("{err:#}").contains("does not end with '.nc'"));
    }
}
