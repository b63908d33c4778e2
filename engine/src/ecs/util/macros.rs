/// Invoke `$m` once for every suffix of the given identifier list, longest first.
///
/// `for_every_tuple!(m !! A, B, C)` expands to `m!(A, B, C); m!(B, C); m!(C);`.
#[macro_export]
macro_rules! for_every_tuple {
    ($m:ident !! $head_ty:ident) => {
        $m!($head_ty);
    };
    ($m:ident !! $head_ty:ident, $($tail_ty:ident),*) => (
        $m!($head_ty, $( $tail_ty ),*);
        $crate::for_every_tuple!($m !! $( $tail_ty ),*);
    );
}

/// Invoke `$m` for tuple arities 1 through 26, with type parameters named `A` to `Z`.
///
/// Used to implement [`IntoSpec`](crate::ecs::component::IntoSpec) and
/// [`Fetch`](crate::ecs::query::Fetch) for component tuples.
#[macro_export]
macro_rules! all_tuples {
    ($m:ident) => {
        $crate::for_every_tuple!($m !! A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z);
    };
}

#[cfg(test)]
mod tests {
    trait Arity {
        const ARITY: usize;
    }

    macro_rules! count_arity {
        ($($name: ident),*) => {
            impl<$($name),*> Arity for ($($name,)*) {
                const ARITY: usize = [$(stringify!($name)),*].len();
            }
        }
    }

    all_tuples!(count_arity);

    #[test]
    fn covers_every_arity() {
        assert_eq!(<(u8,)>::ARITY, 1);
        assert_eq!(<(u8, u16, u32)>::ARITY, 3);
        assert_eq!(
            <(
                u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8,
                u8, u8, u8, u8, u8, u8,
            )>::ARITY,
            26
        );
    }
}
