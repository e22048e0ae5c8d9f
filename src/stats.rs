use std::{fmt::Debug, iter::Sum};

use num_traits::Float;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{Result, WordleError};

#[allow(dead_code)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Tails {
    One,
    Two,
}

impl Tails {
    fn factor<N: Float>(&self) -> N {
        match self {
            Self::One => N::one(),
            Self::Two => N::one() + N::one(),
        }
    }
}

struct Sample<N: Float> {
    mean: N,
    len: N,
    var: N,
}

impl<N: Float + Sum> Sample<N> {
    fn new<T: IntoIterator<Item = N> + Clone>(sample: T) -> Result<Self> {
        let (len, sum) = sample
            .clone()
            .into_iter()
            .fold((0_u32, N::zero()), |acc, next| (acc.0 + 1, acc.1 + next));

        if len < 2 {
            return Err(WordleError::Stats);
        }
        let n = N::from(len).ok_or(WordleError::Stats)?;
        let mean = sum / n;
        let var = sample.into_iter().map(|x| (x - mean).powi(2)).sum::<N>() / (n - N::one());

        Ok(Sample { mean, len: n, var })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WelchsT<N: Float> {
    /// The p-value of the test, which is the probability accepting the results
    /// of the test is an error because the null hypothesis is in fact true.
    pub(crate) p: N,

    /// The maximum allowed p-value.
    pub(crate) alpha: N,

    /// The "tails" of the test.
    pub(crate) tails: Tails,
}

impl<N: Float + Sum + Into<f64>> WelchsT<N> {
    /// Runs the test on two samples.
    ///
    /// Fails when either sample has fewer than two values or when both
    /// samples have no variance at all.
    pub(crate) fn two_sample<T, V>(a: T, b: V, alpha: N, tails: Tails) -> Result<Self>
    where
        T: IntoIterator<Item = N> + Clone,
        V: IntoIterator<Item = N> + Clone,
    {
        if !(alpha > N::zero() && alpha < N::one()) {
            return Err(WordleError::Stats);
        }

        let a = Sample::new(a)?;
        let b = Sample::new(b)?;

        // Uses equations from https://statisticaloddsandends.wordpress.com/2020/07/03/welchs-t-test-and-the-welch-satterthwaite-equation/.
        let se2 = (a.var / a.len) + (b.var / b.len);
        if se2 <= N::zero() {
            return Err(WordleError::Stats);
        }

        let t = (a.mean - b.mean).abs() / se2.sqrt();
        let deg = se2.powi(2)
            / ((a.var.powi(2) / (a.len.powi(2) * (a.len - N::one())))
                + (b.var.powi(2) / (b.len.powi(2) * (b.len - N::one()))));

        let dist = StudentsT::new(0.0, 1.0, deg.into()).map_err(|_| WordleError::Stats)?;
        let p = N::from(dist.cdf((-t).into())).ok_or(WordleError::Stats)? * tails.factor::<N>();

        Ok(Self { p, alpha, tails })
    }

    pub(crate) fn is_significant(&self) -> bool {
        self.p < self.alpha
    }
}
