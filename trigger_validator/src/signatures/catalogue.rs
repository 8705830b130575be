//! The fixed trigger function catalogue.

use crate::types::ParameterKind::*;
use crate::types::{FunctionSignature, ParameterSpec, ValueTypeSet};

const QUERY: ParameterSpec = ParameterSpec::required(Query);
const SCALE: ParameterSpec = ParameterSpec::required(Scale);
const SCALE_OPT: ParameterSpec = ParameterSpec::optional(Scale);
const PATTERN_OPT: ParameterSpec = ParameterSpec::optional(Pattern);
const PERIOD: ParameterSpec = ParameterSpec::required_both_parts(Period);

/// Every supported trigger function with its parameter grammar
pub fn trigger_functions() -> Vec<FunctionSignature> {
    let all = ValueTypeSet::ALL;
    let num = ValueTypeSet::NUMERIC;
    let log = ValueTypeSet::LOG;

    vec![
        FunctionSignature::new("avg", &[QUERY, SCALE], num),
        FunctionSignature::new(
            "count",
            &[QUERY, SCALE, ParameterSpec::optional(Operation), PATTERN_OPT],
            all,
        ),
        FunctionSignature::new("change", &[QUERY], all),
        FunctionSignature::new("date", &[], all),
        FunctionSignature::new("dayofmonth", &[], all),
        FunctionSignature::new("dayofweek", &[], all),
        FunctionSignature::new(
            "find",
            &[QUERY, SCALE_OPT, ParameterSpec::optional(Function), PATTERN_OPT],
            all,
        ),
        FunctionSignature::new(
            "forecast",
            &[
                QUERY,
                SCALE,
                ParameterSpec::required(SecNeg),
                ParameterSpec::optional(Fit),
                ParameterSpec::optional(Mode),
            ],
            num,
        ),
        FunctionSignature::new("fuzzytime", &[QUERY, ParameterSpec::required(SecZero)], num),
        FunctionSignature::new("last", &[QUERY, SCALE_OPT], all),
        FunctionSignature::new("length", &[QUERY], all),
        FunctionSignature::new("logeventid", &[QUERY, PATTERN_OPT], log),
        FunctionSignature::new("logseverity", &[QUERY], log),
        FunctionSignature::new("logsource", &[QUERY, PATTERN_OPT], log),
        FunctionSignature::new("max", &[QUERY, SCALE], num),
        FunctionSignature::new("min", &[QUERY, SCALE], num),
        FunctionSignature::new(
            "nodata",
            &[
                QUERY,
                ParameterSpec::required(SecNeg),
                ParameterSpec::optional(NodataMode),
            ],
            all,
        ),
        FunctionSignature::new("now", &[], all),
        FunctionSignature::new(
            "percentile",
            &[QUERY, SCALE, ParameterSpec::required(Percent)],
            num,
        ),
        FunctionSignature::new("sum", &[QUERY, SCALE], num),
        FunctionSignature::new("time", &[], all),
        FunctionSignature::new(
            "timeleft",
            &[
                QUERY,
                SCALE,
                ParameterSpec::required(NumSuffix),
                ParameterSpec::optional(Fit),
            ],
            num,
        ),
        FunctionSignature::new("trendavg", &[QUERY, PERIOD], num),
        FunctionSignature::new("trendcount", &[QUERY, PERIOD], all),
        FunctionSignature::new("trendmax", &[QUERY, PERIOD], num),
        FunctionSignature::new("trendmin", &[QUERY, PERIOD], num),
        FunctionSignature::new("trendsum", &[QUERY, PERIOD], num),
    ]
}
