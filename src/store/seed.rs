//! Starter menu loaded into an empty store at startup.

use crate::errors::AppError;
use crate::models::{Category, NewMenuItem};

use super::ItemStore;

/// The café's opening menu.
pub fn starter_menu() -> Vec<NewMenuItem> {
    let entry = |name: &str,
                 description: &str,
                 price: i64,
                 category: Category,
                 discount: i64,
                 tags: [&str; 2],
                 rating: f64| NewMenuItem {
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        discount,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating,
        image: None,
    };

    vec![
        entry(
            "اسپرسو",
            "اسپرسو خالص و غلیظ با طعمی منحصر به فرد",
            45_000,
            Category::HotCoffee,
            0,
            ["پرفروش", "کلاسیک"],
            4.8,
        ),
        entry(
            "لاته",
            "ترکیب اسپرسو با شیر گرم و فوم شیر",
            65_000,
            Category::HotCoffee,
            10,
            ["پرفروش", "فوم دار"],
            4.7,
        ),
        entry(
            "کاپوچینو",
            "اسپرسو با نسبت برابر شیر و فوم شیر",
            60_000,
            Category::HotCoffee,
            0,
            ["کلاسیک", "فوم دار"],
            4.6,
        ),
        entry(
            "کلد برو",
            "قهوه سرد دم‌آوری شده با طعم کارامل",
            75_000,
            Category::ColdCoffee,
            20,
            ["ویژه", "تخفیف دار"],
            4.9,
        ),
        entry(
            "آفوگاتو",
            "اسپرسو داغ با بستنی وانیلی",
            80_000,
            Category::Dessert,
            15,
            ["دسر", "مخلوط"],
            4.8,
        ),
        entry(
            "چای ماسالا",
            "چای هندی با ادویه‌های خاص و شیر",
            40_000,
            Category::Tea,
            0,
            ["ادویه‌ای", "هندی"],
            4.5,
        ),
        entry(
            "صبحانه انگلیسی",
            "تخم مرغ، بیکن، قارچ، لوبیا و نان تست",
            120_000,
            Category::Breakfast,
            10,
            ["کامل", "متنوع"],
            4.7,
        ),
        entry(
            "موکا",
            "ترکیب اسپرسو، شیر، شکلات و خامه",
            70_000,
            Category::HotCoffee,
            5,
            ["شکلاتی", "خامه‌ای"],
            4.6,
        ),
        entry(
            "آیس آمریکانو",
            "اسپرسو با آب و یخ برای روزهای گرم",
            50_000,
            Category::ColdCoffee,
            0,
            ["سبک", "مناسب تابستان"],
            4.4,
        ),
    ]
}

/// Insert the starter menu if the store holds no records at all.
///
/// Returns the number of items inserted.
pub async fn seed_menu(store: &dyn ItemStore) -> Result<usize, AppError> {
    let existing = store.count_all().await?;
    if existing > 0 {
        tracing::info!("Store already holds {} items, skipping seed", existing);
        return Ok(0);
    }

    let menu = starter_menu();
    let count = menu.len();
    for item in menu {
        store.insert(item).await?;
    }

    tracing::info!("Seeded {} starter menu items", count);
    Ok(count)
}
