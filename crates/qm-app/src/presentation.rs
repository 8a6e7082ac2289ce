//! Output rounding for stable presentation.

use qm_core::round_to;

use crate::run_service::{CcrReport, RunOutput, SweepCurve, TemperatureReport};

/// Decimal places kept in every reported value.
pub const DECIMALS: u32 = 4;

pub fn present(output: RunOutput) -> RunOutput {
    match output {
        RunOutput::Temperatures(t) => RunOutput::Temperatures(round_temperatures(t)),
        RunOutput::Diagram(d) => RunOutput::Diagram(d.rounded(DECIMALS)),
        RunOutput::Ccr(c) => RunOutput::Ccr(CcrReport {
            rates: c
                .rates
                .into_iter()
                .map(|(k, v)| (k, round_to(v, DECIMALS)))
                .collect(),
            sorted: round_all(&c.sorted),
        }),
        RunOutput::Cooling(c) => RunOutput::Cooling(c.rounded(DECIMALS)),
    }
}

fn round_temperatures(t: TemperatureReport) -> TemperatureReport {
    let r = |v: f64| round_to(v, DECIMALS);
    TemperatureReport {
        model: t.model,
        ms_temp: r(t.ms_temp),
        // rate parameter is ~1e-2; four places would drop most of it
        ms_rate_param: round_to(t.ms_rate_param, 6),
        bs_temp: r(t.bs_temp),
        ae1_temp: r(t.ae1_temp),
        ae3_temp: r(t.ae3_temp),
        eutectoid_carbon: r(t.eutectoid_carbon),
        equilibrium_ferrite_fraction: r(t.equilibrium_ferrite_fraction),
        ae3_sweep: SweepCurve {
            carbon: round_all(&t.ae3_sweep.carbon),
            temp: round_all(&t.ae3_sweep.temp),
        },
    }
}

fn round_all(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| round_to(*v, DECIMALS)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccr_rounded() {
        let out = present(RunOutput::Ccr(CcrReport {
            rates: [("ferrite_nucleation".to_string(), 297.512_345)].into(),
            sorted: vec![297.512_345],
        }));
        let RunOutput::Ccr(c) = out else {
            panic!("expected ccr output");
        };
        assert_eq!(c.rates["ferrite_nucleation"], 297.5123);
        assert_eq!(c.sorted, vec![297.5123]);
    }
}
