use ndarray::{s, Array3, ArrayBase, ArrayViewMut3, Data, Ix3};
use num::Zero;

/// 复制 `volume`, 并将轴向索引严格小于 `neck` 的所有体素置零后返回.
///
/// 输入保持不变. `neck` 超过 Z 时等价于 Z, 即整个体积被置零.
/// 同一 `neck` 重复切割结果不变.
pub fn cut_volume<A, S>(volume: &ArrayBase<S, Ix3>, neck: usize) -> Array3<A>
where
    A: Clone + Zero,
    S: Data<Elem = A>,
{
    let mut out = volume.to_owned();
    cut_volume_in_place(&mut out.view_mut(), neck);
    out
}

/// 同 `cut_volume`, 但直接写入调用者独占借出的 `volume`.
///
/// 返回被置零的轴向切片数.
pub fn cut_volume_in_place<A>(volume: &mut ArrayViewMut3<A>, neck: usize) -> usize
where
    A: Clone + Zero,
{
    let neck = neck.min(volume.len_of(ndarray::Axis(2)));
    volume.slice_mut(s![.., .., ..neck]).fill(A::zero());
    neck
}
