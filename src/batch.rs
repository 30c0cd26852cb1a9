//! Batch translation
//!
//! Each input is an independent call with its own context. With the
//! `parallel` feature the inputs are spread over the rayon thread pool;
//! output order always matches input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::options::TranslateOptions;

/// Translate every input with the same options.
pub fn translate_all<S>(inputs: &[S], options: &TranslateOptions) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        inputs.par_iter().map(|html| crate::translate_with(html.as_ref(), options)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(|html| crate::translate_with(html.as_ref(), options)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_independence() {
        let inputs = ["<p>a</p>", "<ul><li>b</li></ul>", "", "<p><strong>c</strong></p>"];
        let outputs = translate_all(&inputs, &TranslateOptions::PROD);
        assert_eq!(outputs, vec!["a\n\n", "- b\n\n", "", "*c*\n\n"]);
    }

    #[test]
    fn test_matches_single_calls() {
        let inputs: Vec<String> = (0..32).map(|i| format!("<p>x{i}<em>y</em>(z)</p>")).collect();
        let outputs = translate_all(&inputs, &TranslateOptions::PROD);
        for (html, out) in inputs.iter().zip(&outputs) {
            assert_eq!(out, &crate::translate(html));
        }
    }
}
